//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into [`crate::CheckerService`].
//! Request handling never reads the process environment.

use crate::constants::DEFAULT_LOG_PATH;
use crate::{CheckerError, CheckerResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    log_path: PathBuf,
}

impl CoreConfig {
    pub fn new(log_path: PathBuf) -> CheckerResult<Self> {
        if log_path.as_os_str().is_empty() {
            return Err(CheckerError::InvalidInput(
                "log path cannot be empty".into(),
            ));
        }

        Ok(Self { log_path })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

/// Resolve the diagnosis log path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_LOG_PATH`].
pub fn log_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH))
}
