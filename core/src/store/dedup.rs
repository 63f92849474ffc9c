use serde::{Deserialize, Serialize};

use super::LogStore;
use crate::tribe_log::{LogRecord, Occurrence};

/// What one ingest call did with each record of its batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// New keys added to the store
    pub inserted: usize,
    /// Known keys whose repeat count was bumped
    pub repeats: usize,
    /// Unsupported / unclassified records skipped
    pub untracked: usize,
    /// Novel keys dropped for not fitting their neighbors' timestamps
    pub context_rejected: usize,
}

impl IngestReport {
    pub fn merge(&mut self, other: &IngestReport) {
        self.inserted += other.inserted;
        self.repeats += other.repeats;
        self.untracked += other.untracked;
        self.context_rejected += other.context_rejected;
    }
}

/// Whether the record at `index` sits plausibly among its neighbors in a
/// newest-first feed.
///
/// A missing neighbor counts as `SameTime`, so the first and last records
/// of a batch always fit.
pub fn fits_time_context(records: &[LogRecord], index: usize) -> bool {
    let Some(record) = records.get(index) else {
        return false;
    };

    // Both comparisons read "neighbor relative to record"
    let prev = index
        .checked_sub(1)
        .and_then(|i| records.get(i))
        .map_or(Occurrence::SameTime, |p| p.compare_time(record));
    let next = records
        .get(index + 1)
        .map_or(Occurrence::SameTime, |n| n.compare_time(record));

    prev == Occurrence::SameTime
        || next == Occurrence::SameTime
        || (prev == Occurrence::After && next == Occurrence::Before)
}

/// Merge one capture's classified records into the store.
///
/// `records` must be in capture order; neighbors for the context check are
/// taken from it as-is, untracked records included.
pub fn ingest(store: &mut LogStore, records: &[LogRecord]) -> IngestReport {
    let mut report = IngestReport::default();

    for (index, record) in records.iter().enumerate() {
        if !record.kind.is_tracked() {
            report.untracked += 1;
            continue;
        }

        if store.record_repeat(&record.key()).is_some() {
            report.repeats += 1;
            continue;
        }

        if fits_time_context(records, index) {
            store.insert(record.clone());
            report.inserted += 1;
        } else {
            tracing::debug!(
                index,
                time = %record.time,
                kind = ?record.kind,
                "Dropping record that does not fit its neighbors"
            );
            report.context_rejected += 1;
        }
    }

    tracing::debug!(
        inserted = report.inserted,
        repeats = report.repeats,
        untracked = report.untracked,
        context_rejected = report.context_rejected,
        stored = store.len(),
        "Ingested batch"
    );

    report
}
