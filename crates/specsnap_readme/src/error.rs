//! Error types for readme parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for readme operations.
pub type ReadmeResult<T> = Result<T, ReadmeError>;

/// Errors that can occur while reading a readme descriptor.
///
/// Missing descriptors, missing tags and missing blocks are not errors; those
/// surface as `None` from the resolving functions.
#[derive(Error, Debug)]
pub enum ReadmeError {
    #[error("Unterminated yaml block for tag '{tag}' opened at line {line}")]
    UnterminatedBlock { tag: String, line: usize },

    #[error("Invalid yaml block for tag '{tag}': {message}")]
    InvalidBlock { tag: String, message: String },

    #[error("Failed to read descriptor {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
