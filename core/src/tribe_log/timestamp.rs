//! In-game timestamp extraction with OCR digit repair.
//!
//! The overlay prints `Day 00102, 14:23:05: <payload>`. OCR regularly
//! turns the `y` of `Day` into `v`, mangles separators, and reads digits as
//! look-alike letters, so the pattern accepts any of those and the numeric
//! fields are repaired through [`OCR_DIGITS`] before parsing.

use phf::phf_map;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::record::{GameTime, TimestampedLine};

/// Letters OCR produces in place of digits.
pub static OCR_DIGITS: phf::Map<char, u8> = phf_map! {
    'O' => 0, 'o' => 0, 'Q' => 0,
    'I' => 1, 'i' => 1, 'L' => 1, 'l' => 1, 'J' => 1, 'j' => 1,
    'B' => 8,
    'S' => 5, 's' => 5,
    'Z' => 2, 'z' => 2,
};

static TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"Da[yv].{1,5}",
        r"(?P<day>[0-9OoQIiLlJjBSsZz]{5}).{0,2}",
        r"(?P<hour>[0-9OoQIiLlJjBSsZz]{2}).{0,2}",
        r"(?P<minute>[0-9OoQIiLlJjBSsZz]{2}).{0,2}",
        r"(?P<second>[0-9OoQIiLlJjBSsZz]{2})",
    ))
    .expect("timestamp pattern is a valid literal regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeField {
    /// Largest value the field may hold after parsing.
    fn max(self) -> u32 {
        match self {
            Self::Day => u32::MAX,
            Self::Hour => 23,
            Self::Minute | Self::Second => 59,
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        })
    }
}

/// A numeric field could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigitError {
    #[error("character {0:?} has no digit mapping")]
    Unmapped(char),

    #[error("numeric field is empty")]
    Empty,

    #[error("numeric field overflows")]
    Overflow,
}

/// Why a line produced no timestamp. Every variant is a line-level drop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("no in-game timestamp found")]
    NoMatch,

    #[error("{field} field could not be corrected: {source}")]
    Digits { field: TimeField, source: DigitError },

    #[error("{field} value {value} is out of range")]
    OutOfRange { field: TimeField, value: u32 },
}

/// Map one character to its digit value, repairing OCR look-alikes.
pub fn correct_digit(c: char) -> Option<u8> {
    match c.to_digit(10) {
        Some(d) => Some(d as u8),
        None => OCR_DIGITS.get(&c).copied(),
    }
}

/// Parse a numeric field, repairing OCR look-alikes character by character.
///
/// Any character that is neither an ASCII digit nor in [`OCR_DIGITS`]
/// fails the whole field.
pub fn correct_digits(field: &str) -> Result<u32, DigitError> {
    if field.is_empty() {
        return Err(DigitError::Empty);
    }

    field.chars().try_fold(0u32, |acc, c| {
        let digit = correct_digit(c).ok_or(DigitError::Unmapped(c))?;
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(digit)))
            .ok_or(DigitError::Overflow)
    })
}

fn decode_field(raw: &str, field: TimeField) -> Result<u32, TimestampError> {
    let value = correct_digits(raw).map_err(|source| TimestampError::Digits { field, source })?;
    if value > field.max() {
        return Err(TimestampError::OutOfRange { field, value });
    }
    Ok(value)
}

/// Locate the in-game timestamp in `line` and split off the payload text.
///
/// When a colon directly follows the timestamp, the payload starts after
/// the colon and the one character after it (the overlay's `": "`).
pub fn extract_timestamp(line: &str) -> Result<TimestampedLine, TimestampError> {
    let caps = TIMESTAMP_PATTERN
        .captures(line)
        .ok_or(TimestampError::NoMatch)?;
    let end = caps.get(0).map_or(0, |m| m.end());

    let day = decode_field(&caps["day"], TimeField::Day)?;
    // Range-checked above, so the narrowing casts are lossless
    let hour = decode_field(&caps["hour"], TimeField::Hour)? as u8;
    let minute = decode_field(&caps["minute"], TimeField::Minute)? as u8;
    let second = decode_field(&caps["second"], TimeField::Second)? as u8;

    let rest = &line[end..];
    let payload = match rest.strip_prefix(':') {
        Some(after_colon) => {
            let mut chars = after_colon.chars();
            chars.next();
            chars.as_str()
        }
        None => rest,
    };

    Ok(TimestampedLine {
        time: GameTime::new(day, hour, minute, second),
        text: payload.trim().to_string(),
    })
}
