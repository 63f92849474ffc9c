//! Application configuration schema.
//!
//! Every field carries a serde default so partial config files (or files
//! written by an older version) still load.

use serde::{Deserialize, Serialize};

/// Default number of entries the log store is pre-sized for.
pub const DEFAULT_STORE_CAPACITY: usize = 100;

/// Default acceptance threshold for the phrase classifier.
pub const DEFAULT_MIN_PHRASE_SCORE: f32 = 0.8;

/// Which classifier implementation an ingest session is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Ordered suffix/prefix rules
    #[default]
    Rules,
    /// Similarity scoring against a catalog of canonical phrases
    Phrase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Initial capacity of the log store. Must not fall below the store's
    /// minimum floor or session construction fails.
    #[serde(default = "default_store_capacity")]
    pub capacity: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_STORE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    #[serde(default)]
    pub kind: ClassifierKind,

    /// Minimum similarity (0.0..=1.0) a catalog phrase needs to win.
    /// Only read by the phrase classifier.
    #[serde(default = "default_min_phrase_score")]
    pub min_phrase_score: f32,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::default(),
            min_phrase_score: DEFAULT_MIN_PHRASE_SCORE,
        }
    }
}

/// Top-level config persisted by confy / read from TOML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub classifier: ClassifierSettings,
}

fn default_store_capacity() -> usize {
    DEFAULT_STORE_CAPACITY
}

fn default_min_phrase_score() -> f32 {
    DEFAULT_MIN_PHRASE_SCORE
}
