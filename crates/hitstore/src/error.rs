//! Error types for the hitstore crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when building criteria or persisting a store.
///
/// In-memory queries never produce an error; the variants here come from
/// pattern compilation, configuration parsing and file I/O.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// The previous store file could not be copied to its backup.
    #[error("could not back up {}: {source}", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the store file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but does not hold a valid hit list.
    #[error("malformed store file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Hits could not be serialized.
    #[error("could not encode hits: {0}")]
    Encode(#[source] serde_json::Error),

    /// Configuration text could not be parsed.
    #[error("invalid store configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// A save was requested but no backing file is configured.
    #[error("store has no backing file configured")]
    NoPath,
}

/// Result type for hitstore operations.
pub type Result<T> = std::result::Result<T, StoreError>;
