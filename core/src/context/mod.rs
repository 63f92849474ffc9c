mod app_config;
mod parsing_session;

pub use app_config::{APP_NAME, AppConfigExt, ConfigError};
pub use parsing_session::{BatchSummary, IngestSession, SharedIngestSession};
