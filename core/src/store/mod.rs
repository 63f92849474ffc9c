//! Keyed storage of accepted tribe log records.
//!
//! The store only grows: it never evicts, and a stored record is never
//! replaced. A re-sighting of a known key bumps that record's
//! `repeat_count` and nothing else.

mod dedup;


pub use dedup::{IngestReport, fits_time_context, ingest};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::tribe_log::{IdentityKey, LogRecord};

/// Smallest capacity a store may be configured with. Anything lower is
/// treated as a misconfiguration.
pub const MIN_STORE_CAPACITY: usize = 75;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store capacity {requested} is below the minimum of {minimum}")]
    CapacityBelowMinimum { requested: usize, minimum: usize },
}

#[derive(Debug, Clone)]
pub struct LogStore {
    records: HashMap<IdentityKey, LogRecord>,
}

impl LogStore {
    pub fn with_capacity(capacity: usize) -> Result<Self, StoreError> {
        if capacity < MIN_STORE_CAPACITY {
            return Err(StoreError::CapacityBelowMinimum {
                requested: capacity,
                minimum: MIN_STORE_CAPACITY,
            });
        }
        Ok(Self {
            records: HashMap::with_capacity(capacity),
        })
    }

    /// Insert a record under its identity key.
    ///
    /// Returns `false` and leaves the stored record untouched when the key is
    /// already present.
    pub fn insert(&mut self, record: LogRecord) -> bool {
        match self.records.entry(record.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    /// Count another sighting of a stored key. Returns the new repeat count,
    /// or `None` if the key is not stored.
    pub fn record_repeat(&mut self, key: &IdentityKey) -> Option<u32> {
        let record = self.records.get_mut(key)?;
        record.repeat_count += 1;
        Some(record.repeat_count)
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&LogRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IdentityKey, &LogRecord)> {
        self.records.iter()
    }

    /// Stored records ordered like the overlay shows them: newest first.
    pub fn records_newest_first(&self) -> Vec<&LogRecord> {
        let mut records: Vec<&LogRecord> = self.records.values().collect();
        records.sort_by(|a, b| {
            b.time
                .cmp(&a.time)
                .then_with(|| a.subject.cmp(&b.subject))
                .then_with(|| a.kind.cmp(&b.kind))
        });
        records
    }
}
