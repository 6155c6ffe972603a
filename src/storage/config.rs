//! Configuration handling for the transport CLI
//!
//! Configuration is read from `transport.toml` in the working directory.
//! Every key is optional; a missing file means defaults, and so does an
//! unreadable or invalid one (the error is handed back for logging).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::records::DEFAULT_DATA_FILE;

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "transport.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the vehicle data file
    pub data_file: PathBuf,

    /// Log filter directive for stderr logging (e.g. "warn", "debug")
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads `transport.toml` from the working directory, or defaults
    pub fn load() -> (Self, Option<ConfigError>) {
        Self::from_file_or_default(Path::new(CONFIG_FILE))
    }

    /// Loads an optional configuration file
    ///
    /// A missing file gives defaults. A file that cannot be read or parsed
    /// also gives defaults, together with the error that was ignored.
    pub fn from_file_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Loads configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}
