//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating worker configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Failed to parse a manifest record.
    #[error("Invalid manifest record: {0}")]
    Manifest(#[from] serde_json::Error),

    /// The worker origin is not an absolute http(s) origin.
    #[error("Invalid origin '{0}': expected scheme://host[:port]")]
    InvalidOrigin(String),

    /// A resource or shell path is empty.
    #[error("Empty resource path")]
    EmptyPath,

    /// A resource path other than `/` starts with a slash.
    #[error("Resource path '{0}' must be relative to the origin")]
    RootedPath(String),

    /// A shell entry is not listed in the resources.
    #[error("Shell entry '{0}' is not a known resource")]
    UnknownCoreEntry(String),

    /// A shell entry is listed twice.
    #[error("Shell entry '{0}' is listed more than once")]
    DuplicateCoreEntry(String),
}
