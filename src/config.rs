//! Configuration loading for encfacter
//!
//! The configuration file is a JSON object with a single `url` key naming the
//! classifier endpoint. It is read once at startup and passed by value through
//! the pipeline.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("could not read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a valid configuration document
    #[error("could not parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The `url` key is empty
    #[error("config {} has an empty url", path.display())]
    MissingUrl { path: PathBuf },
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Classifier endpoint to fetch facts from
    pub url: String,
}

impl Config {
    /// Loads and validates the configuration at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if config.url.trim().is_empty() {
            return Err(ConfigError::MissingUrl {
                path: path.to_path_buf(),
            });
        }

        Ok(config)
    }
}
