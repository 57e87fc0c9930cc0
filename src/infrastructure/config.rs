//! Options config file
//!
//! Loads [`ValidationOptions`] from a JSON document. Every field is optional;
//! anything left out keeps its default.

use crate::application::dto::ValidationOptions;
use crate::domain::services::pattern_corpus;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading validation options
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_size_bytes must be greater than zero")]
    InvalidMaxSize,
}

/// Parses options from a JSON string
pub fn parse_options(json: &str) -> Result<ValidationOptions, ConfigError> {
    let options: ValidationOptions = serde_json::from_str(json)?;

    if options.max_size_bytes == 0 {
        return Err(ConfigError::InvalidMaxSize);
    }

    for id in &options.whitelist {
        if !pattern_corpus::whitelistable_ids().any(|known| known == id) {
            tracing::warn!(id = %id, "whitelist entry names no rule and has no effect");
        }
    }

    Ok(options)
}

/// Reads and parses an options file
pub fn load_options(path: impl AsRef<Path>) -> Result<ValidationOptions, ConfigError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let options = parse_options(&json)?;
    tracing::debug!(path = %path.display(), ?options, "loaded validation options");
    Ok(options)
}
