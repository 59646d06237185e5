//! Error types for discovery and copying.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that abort a sync run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Source folder not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Input file declared by {api_set} does not exist: {path}")]
    MissingInputFile { api_set: String, path: PathBuf },

    #[error("Input file declared by {api_set} points outside its folder: {path}")]
    InvalidInputPath { api_set: String, path: String },

    #[error("Failed to copy {from} to {to}: {message}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Invalid descriptor {path}: {source}")]
    Descriptor {
        path: PathBuf,
        #[source]
        source: specsnap_readme::ReadmeError,
    },

    #[error("Failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
