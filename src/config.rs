//! Configuration file loading.
//!
//! A config file is JSON with two optional sections:
//!
//! ```json
//! {
//!   "settings": { "claim_duration_minutes": 30 },
//!   "layout": { "radius": 7, "banners": ["ACA"], "relics": ["AAC"] }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::MapLayout;
use crate::settings::Settings;

/// Error loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid config JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Durations and limits.
    pub settings: Settings,
    /// Map shape and tile tags.
    pub layout: MapLayout,
}

impl Config {
    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, otherwise use the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a given file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
