use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for extraction operations
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Failed to serialize a YAML dictionary document
    #[error("Failed to write YAML file {file}:\n{reason}")]
    YamlEmitError { file: PathBuf, reason: String },

    /// Failed to parse or serialize the suggestion cache
    #[error("Failed to process suggestion cache {file}:\n{reason}")]
    JsonError { file: PathBuf, reason: String },

    /// Failed to parse the project configuration file
    #[error("Invalid configuration in {file}:\n{reason}\n\nTip: Check the keys in your .i18n-extract.toml")]
    ConfigError { file: PathBuf, reason: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub fn yaml_emit_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::YamlEmitError {
            file: file.into(),
            reason: reason.into(),
        }
    }

    pub fn json_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::JsonError {
            file: file.into(),
            reason: reason.into(),
        }
    }

    pub fn config_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigError {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for ExtractError
pub type Result<T> = std::result::Result<T, ExtractError>;
