//! Tribe log text model and parsing.
//!
//! ```text
//! raw OCR text ─► reconstruct_lines ─► extract_timestamp ─► classifier ─► LogRecord
//!                 (merge OCR wraps)    (repair digits)      (kind, subject)
//! ```

mod lines;
mod parser;
mod record;
mod timestamp;

pub use lines::{MIN_CHARACTER_THRESHOLD, reconstruct_lines};
pub use parser::{ParseStats, ParsedBatch, TribeLogParser};
pub use record::{EventKind, GameTime, IdentityKey, LogRecord, Occurrence, TimestampedLine};
pub use timestamp::{
    DigitError, OCR_DIGITS, TimeField, TimestampError, correct_digit, correct_digits,
    extract_timestamp,
};
