//! Output contract of the parse worker.
//!
//! The worker prints exactly one [`IngestOutput`] as JSON on stdout; any
//! consumer deserializes the same struct.

use serde::{Deserialize, Serialize};

use crate::context::IngestSession;
use crate::store::IngestReport;
use crate::tribe_log::{LogRecord, ParseStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOutput {
    /// Number of captures ingested.
    pub captures: usize,
    /// Parse statistics summed over all captures.
    pub parse: ParseStats,
    /// Ingest outcome summed over all captures.
    pub ingest: IngestReport,
    /// Stored records, newest first.
    pub records: Vec<LogRecord>,
    /// Unsupported / unclassified records seen along the way.
    pub untracked: Vec<LogRecord>,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u128,
}

impl IngestOutput {
    pub fn from_session(session: &IngestSession, untracked: Vec<LogRecord>) -> Self {
        Self {
            captures: session.batch_count(),
            parse: *session.parse_totals(),
            ingest: *session.ingest_totals(),
            records: session
                .store()
                .records_newest_first()
                .into_iter()
                .cloned()
                .collect(),
            untracked,
            elapsed_ms: 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tribe_log::EventKind;
    use tribelog_types::AppConfig;

    #[test]
    fn test_output_from_session() {
        let mut session = IngestSession::new(AppConfig::default()).unwrap();
        let summary = session.ingest_text(
            "Day 00050, 10:05:00: Your Tribe Killed a Raptor!\n\
             Day 00050, 10:00:00: Your Stone Wall was destroyed!\n\
             Day 00050, 09:00:00: Your Dodo looked around\n",
        );

        let output = IngestOutput::from_session(&session, summary.untracked);
        assert_eq!(output.captures, 1);
        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].kind, EventKind::EnemyEntityKilled);
        assert_eq!(output.untracked.len(), 1);
        assert_eq!(output.untracked[0].kind, EventKind::Unclassified);
        assert_eq!(output.parse.unclassified, 1);
    }

    #[test]
    fn test_json_contract_fields() {
        let session = IngestSession::new(AppConfig::default()).unwrap();
        let output = IngestOutput::from_session(&session, Vec::new());
        let json = output.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for field in ["captures", "parse", "ingest", "records", "untracked", "elapsed_ms"] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["ingest"]["context_rejected"], 0);
    }
}
