use std::sync::{Arc, Mutex, PoisonError};

use tribelog_types::AppConfig;

use crate::classify::build_classifier;
use crate::store::{IngestReport, LogStore, StoreError, ingest};
use crate::tribe_log::{LogRecord, ParseStats, TribeLogParser};

/// Result of ingesting one capture.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub parse: ParseStats,
    pub ingest: IngestReport,
    /// Unsupported / unclassified records, kept for inspection only
    pub untracked: Vec<LogRecord>,
}

/// Owns the parser and the store for one run over successive captures.
pub struct IngestSession {
    config: AppConfig,
    parser: TribeLogParser,
    store: LogStore,
    batch_count: usize,
    parse_totals: ParseStats,
    ingest_totals: IngestReport,
}

impl IngestSession {
    /// Fails fast when the configured store capacity is below the floor.
    pub fn new(config: AppConfig) -> Result<Self, StoreError> {
        let store = LogStore::with_capacity(config.store.capacity)?;
        let parser = TribeLogParser::new(build_classifier(&config.classifier));
        Ok(Self {
            config,
            parser,
            store,
            batch_count: 0,
            parse_totals: ParseStats::default(),
            ingest_totals: IngestReport::default(),
        })
    }

    /// Parse one raw capture and merge it into the store.
    pub fn ingest_text(&mut self, raw: &str) -> BatchSummary {
        let batch = self.parser.parse(raw);
        let report = self.ingest_records(&batch.records);
        self.parse_totals.merge(&batch.stats);

        let untracked = batch
            .records
            .into_iter()
            .filter(|r| !r.kind.is_tracked())
            .collect();

        BatchSummary {
            parse: batch.stats,
            ingest: report,
            untracked,
        }
    }

    /// Merge already-classified records, in capture order.
    pub fn ingest_records(&mut self, records: &[LogRecord]) -> IngestReport {
        let report = ingest(&mut self.store, records);
        self.batch_count += 1;
        self.ingest_totals.merge(&report);
        report
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    pub fn parse_totals(&self) -> &ParseStats {
        &self.parse_totals
    }

    pub fn ingest_totals(&self) -> &IngestReport {
        &self.ingest_totals
    }
}

/// A session shared between capture sources.
///
/// Each `ingest_text` call holds the lock for the whole batch, so the
/// neighbor check never sees two batches interleaved.
#[derive(Clone)]
pub struct SharedIngestSession {
    inner: Arc<Mutex<IngestSession>>,
}

impl SharedIngestSession {
    pub fn new(session: IngestSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn ingest_text(&self, raw: &str) -> BatchSummary {
        let mut session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        session.ingest_text(raw)
    }

    /// Run `f` against the session while holding the lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&IngestSession) -> R) -> R {
        let session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MIN_STORE_CAPACITY;
    use crate::tribe_log::{EventKind, GameTime};
    use std::thread;
    use tribelog_types::{ClassifierKind, StoreSettings};

    const CAPTURE: &str = "\
Day 00050, 10:05:00: Your Tribe Killed a Raptor!
Day 00050, 10:00:00: Your Stone Wall was destroyed!
Day 00050, 09:00:00: Tribemember Bob was killed!
";

    #[test]
    fn test_rejects_small_capacity() {
        let config = AppConfig {
            store: StoreSettings { capacity: 10 },
            ..Default::default()
        };
        let err = IngestSession::new(config).err().unwrap();
        assert_eq!(
            err,
            StoreError::CapacityBelowMinimum {
                requested: 10,
                minimum: MIN_STORE_CAPACITY
            }
        );
    }

    #[test]
    fn test_ingest_text_twice() {
        let mut session = IngestSession::new(AppConfig::default()).unwrap();

        let first = session.ingest_text(CAPTURE);
        assert_eq!(first.ingest.inserted, 2);
        assert_eq!(first.untracked.len(), 1);
        assert_eq!(first.untracked[0].kind, EventKind::Unsupported);

        let second = session.ingest_text(CAPTURE);
        assert_eq!(second.ingest.inserted, 0);
        assert_eq!(second.ingest.repeats, 2);

        assert_eq!(session.store().len(), 2);
        assert_eq!(session.batch_count(), 2);
        assert_eq!(session.parse_totals().lines, 6);
        assert_eq!(session.ingest_totals().repeats, 2);
        assert_eq!(session.ingest_totals().untracked, 2);
    }

    #[test]
    fn test_session_uses_configured_classifier() {
        let mut config = AppConfig::default();
        config.classifier.kind = ClassifierKind::Phrase;
        let mut session = IngestSession::new(config).unwrap();

        session.ingest_text("Day 00050, 10:00:00: Your Stone Wall was destroved!\n");
        let stored = session.store().records_newest_first();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kind, EventKind::StructureDestroyedByEnemy);
        assert_eq!(stored[0].time, GameTime::new(50, 10, 0, 0));
    }

    #[test]
    fn test_shared_session_across_threads() {
        let shared = SharedIngestSession::new(IngestSession::new(AppConfig::default()).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.ingest_text(CAPTURE))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with_session(|session| {
            assert_eq!(session.store().len(), 2);
            assert_eq!(session.batch_count(), 4);
            assert_eq!(session.ingest_totals().inserted, 2);
            assert_eq!(session.ingest_totals().repeats, 6);
        });
    }
}
