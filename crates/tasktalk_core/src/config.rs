//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve data file, logging and persona settings from the environment.
//!
//! # Invariants
//! - Every field has a usable default; an empty environment is valid.
//! - Invalid values are reported, never silently replaced.

use crate::logging::{LogLevel, LoggingError};
use crate::service::assistant::DEFAULT_ASSISTANT_NAME;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DATA_FILE: &str = "TASKTALK_DATA_FILE";
pub const ENV_LOG_LEVEL: &str = "TASKTALK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKTALK_LOG_DIR";
pub const ENV_NAME: &str = "TASKTALK_NAME";

pub const DEFAULT_DATA_FILE: &str = "data/tasks.txt";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Empty { key: &'static str },
    Logging { key: &'static str, source: LoggingError },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { key } => write!(f, "{key} is set but empty"),
            Self::Logging { key, source } => write!(f, "{key}: {source}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Empty { .. } => None,
            Self::Logging { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Line-oriented task store.
    pub data_file: PathBuf,
    pub log_level: LogLevel,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
    /// Name the assistant greets with.
    pub assistant_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: LogLevel::build_default(),
            log_dir: None,
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `TASKTALK_*` variables from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(value) = non_empty(&lookup, ENV_DATA_FILE)? {
            config.data_file = PathBuf::from(value);
        }
        if let Some(value) = non_empty(&lookup, ENV_LOG_LEVEL)? {
            config.log_level = LogLevel::parse(&value).map_err(|source| ConfigError::Logging {
                key: ENV_LOG_LEVEL,
                source,
            })?;
        }
        if let Some(value) = non_empty(&lookup, ENV_LOG_DIR)? {
            let dir = PathBuf::from(value);
            if !dir.is_absolute() {
                return Err(ConfigError::Logging {
                    key: ENV_LOG_DIR,
                    source: LoggingError::RelativeDir(dir),
                });
            }
            config.log_dir = Some(dir);
        }
        if let Some(value) = non_empty(&lookup, ENV_NAME)? {
            config.assistant_name = value;
        }

        Ok(config)
    }
}

fn non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> ConfigResult<Option<String>> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}
