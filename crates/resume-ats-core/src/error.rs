//! Error types for resume-ats-core.
//!
//! The scoring path itself has no error type: every failure degrades to a
//! best-effort score. These errors belong to configuration loading and to the
//! concrete collaborators that touch the filesystem.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised inside a concrete collaborator before they are downgraded.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A backing file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A backing file was read but its content is unusable.
    #[error("malformed content in {path}: {reason}")]
    Malformed {
        /// The file that failed.
        path: Utf8PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// The requested key is not served by this provider.
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

/// Result type alias using [`ProviderError`].
pub type ProviderResult<T> = Result<T, ProviderError>;
