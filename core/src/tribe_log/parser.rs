use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::lines::reconstruct_lines;
use super::record::{EventKind, LogRecord};
use super::timestamp::{TimestampError, extract_timestamp};
use crate::classify::{EventClassifier, RuleClassifier};

/// Per-batch counts of what the parse stage kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Logical lines after reconstruction
    pub lines: usize,
    pub no_timestamp: usize,
    pub bad_digits: usize,
    pub out_of_range: usize,
    pub unsupported: usize,
    pub unclassified: usize,
}

impl ParseStats {
    pub fn dropped(&self) -> usize {
        self.no_timestamp + self.bad_digits + self.out_of_range
    }

    pub fn merge(&mut self, other: &ParseStats) {
        self.lines += other.lines;
        self.no_timestamp += other.no_timestamp;
        self.bad_digits += other.bad_digits;
        self.out_of_range += other.out_of_range;
        self.unsupported += other.unsupported;
        self.unclassified += other.unclassified;
    }
}

/// Classified records of one capture, in capture order.
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub records: Vec<LogRecord>,
    pub stats: ParseStats,
}

/// Runs raw OCR text through reconstruction, timestamp extraction and
/// classification.
pub struct TribeLogParser {
    classifier: Box<dyn EventClassifier + Send + Sync>,
}

impl Default for TribeLogParser {
    fn default() -> Self {
        Self::new(Box::new(RuleClassifier::new()))
    }
}

impl TribeLogParser {
    pub fn new(classifier: Box<dyn EventClassifier + Send + Sync>) -> Self {
        Self { classifier }
    }

    pub fn parse(&self, raw: &str) -> ParsedBatch {
        self.parse_at(raw, Local::now().naive_local())
    }

    /// Parse with an explicit ingest timestamp stamped on every record.
    pub fn parse_at(&self, raw: &str, ingested_at: NaiveDateTime) -> ParsedBatch {
        let lines = reconstruct_lines(raw);
        let mut stats = ParseStats {
            lines: lines.len(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(lines.len());

        for (idx, line) in lines.iter().enumerate() {
            let timestamped = match extract_timestamp(line) {
                Ok(timestamped) => timestamped,
                Err(e) => {
                    match e {
                        TimestampError::NoMatch => stats.no_timestamp += 1,
                        TimestampError::Digits { .. } => stats.bad_digits += 1,
                        TimestampError::OutOfRange { .. } => stats.out_of_range += 1,
                    }
                    tracing::debug!(idx, line = %line, error = %e, "Skipping log line");
                    continue;
                }
            };

            let record = self.classifier.classify_line(timestamped, ingested_at);
            match record.kind {
                EventKind::Unsupported => stats.unsupported += 1,
                EventKind::Unclassified => stats.unclassified += 1,
                _ => {}
            }
            records.push(record);
        }

        tracing::debug!(
            lines = stats.lines,
            records = records.len(),
            dropped = stats.dropped(),
            "Parsed tribe log capture"
        );

        ParsedBatch { records, stats }
    }
}
