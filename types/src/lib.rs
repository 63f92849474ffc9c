//! Shared types for tribelog crates.
//!
//! Kept free of any pipeline logic so the config schema can be read and
//! written by tools that never touch the core.

pub mod config;
pub mod formatting;

pub use config::{
    AppConfig, ClassifierKind, ClassifierSettings, StoreSettings, DEFAULT_MIN_PHRASE_SCORE,
    DEFAULT_STORE_CAPACITY,
};
