use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tribelog_types::formatting::format_game_time;

/// What a tribe log line reports.
///
/// Ordered by declaration, which only serves to make listings stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    EnemyEntityKilled,
    StructureDestroyedByEnemy,
    DinoStarvedToDeath,
    FriendlyLivingEntityKilled,
    AutoDecayDestroyed,
    /// Subject marker present, no terminal phrase matched
    Unclassified,
    /// Line lacked the leading subject marker
    Unsupported,
}

impl EventKind {
    /// Whether records of this kind take part in deduplication and storage.
    pub fn is_tracked(self) -> bool {
        !matches!(self, Self::Unclassified | Self::Unsupported)
    }
}

/// Result of comparing one in-game timestamp to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    Before,
    SameTime,
    After,
}

impl From<Ordering> for Occurrence {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Before,
            Ordering::Equal => Self::SameTime,
            Ordering::Greater => Self::After,
        }
    }
}

/// In-game timestamp decoded from a log line.
///
/// Field order is significant: the derived `Ord` compares day, hour,
/// minute, second lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameTime {
    pub day: u32,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl GameTime {
    pub fn new(day: u32, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            day,
            hour,
            minute,
            second,
        }
    }

    /// Where `self` falls relative to `other`.
    pub fn compare(&self, other: &GameTime) -> Occurrence {
        self.cmp(other).into()
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_game_time(
            self.day,
            self.hour,
            self.minute,
            self.second,
        ))
    }
}

/// Composite key two sightings of the same event share, whatever OCR did
/// to their subject text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    pub time: GameTime,
    pub kind: EventKind,
}

/// A log line whose timestamp has been decoded but whose payload has not
/// been classified yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedLine {
    pub time: GameTime,
    pub text: String,
}

/// A classified tribe log event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Payload with the boilerplate verb phrase removed
    pub subject: String,
    pub kind: EventKind,
    pub time: GameTime,
    /// Wall-clock time the record was produced
    pub ingested_at: NaiveDateTime,
    /// Confirmed re-sightings of this key after the first insert
    pub repeat_count: u32,
}

impl LogRecord {
    pub fn new(time: GameTime, kind: EventKind, subject: String, ingested_at: NaiveDateTime) -> Self {
        Self {
            subject,
            kind,
            time,
            ingested_at,
            repeat_count: 0,
        }
    }

    pub fn key(&self) -> IdentityKey {
        IdentityKey {
            time: self.time,
            kind: self.kind,
        }
    }

    pub fn compare_time(&self, other: &LogRecord) -> Occurrence {
        self.time.compare(&other.time)
    }
}
