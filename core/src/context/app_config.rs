use std::fs;
use std::path::{Path, PathBuf};

use tribelog_types::AppConfig;

/// Name confy stores the config under.
pub const APP_NAME: &str = "tribelog";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config store error: {0}")]
    Confy(#[from] confy::ConfyError),
}

/// Loading and saving for [`AppConfig`], which lives in the dependency-free
/// types crate.
pub trait AppConfigExt: Sized {
    /// Load from the confy location, falling back to defaults.
    fn load() -> Self;

    /// Load an explicit TOML file.
    fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

    fn save(&self) -> Result<(), ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load(APP_NAME, None).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, self)?;
        Ok(())
    }
}
