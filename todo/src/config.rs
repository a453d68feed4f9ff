//! Configuration for the todo application.
//!
//! Loads configuration from environment variables, falling back to defaults.
//! A `.env` file in the working directory is read by the binary before
//! [`Config::from_env`] runs.

use crate::persistence::STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default directory for persisted data
pub const DEFAULT_DATA_DIR: &str = ".taskflow";

/// Default log filter when neither `RUST_LOG` nor `TODO_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "todo=info,taskflow_runtime=warn";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory the list is stored in (`TODO_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Key the list is stored under (`TODO_STORAGE_KEY`)
    pub storage_key: String,
    /// Tracing filter directive (`TODO_LOG`), overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: STORAGE_KEY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Unset or blank values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: lookup("TODO_DATA_DIR")
                .filter(|s| !s.trim().is_empty())
                .map_or(defaults.data_dir, PathBuf::from),
            storage_key: lookup("TODO_STORAGE_KEY")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.storage_key),
            log_filter: lookup("TODO_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Replaces the data directory, e.g. from a command-line flag
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}
