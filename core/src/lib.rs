pub mod classify;
pub mod context;
pub mod state;
pub mod store;
pub mod tribe_log;

// Re-exports for convenience
pub use classify::{Classification, EventClassifier, build_classifier};
pub use context::{AppConfigExt, IngestSession, SharedIngestSession};
pub use store::{IngestReport, LogStore, StoreError, ingest};
pub use tribe_log::*;
pub use tribelog_types::AppConfig;
