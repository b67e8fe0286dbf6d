//! Typed error definitions for pathtree.
//! Every failure carries the offending path and a human-readable cause so callers
//! never have to guess which input was rejected.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::helpers::describe_io_error;

/// Convenience alias used across the library.
pub type Result<T, E = PathTreeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PathTreeError {
    /// Malformed input, triple-dot segment, directory marker on a file path, degenerate root-only file.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The caller-supplied buffer cannot even hold the minimal result.
    #[error("Invalid argument for '{path}': {reason}")]
    InvalidArgument { path: String, reason: String },

    #[error("Buffer too small for '{path}': need {needed} bytes, capacity is {capacity}")]
    BufferTooSmall {
        path: String,
        needed: usize,
        capacity: usize,
    },

    /// A `..` segment would climb above the root prefix.
    #[error("Path '{path}' escapes out of the root directory")]
    PathEscapesRoot { path: String },

    #[error("{}", describe_io_error(.op, .path, .source))]
    Os {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Out of memory while processing '{path}'")]
    OutOfMemory { path: String },

    /// Raised by walk visitors that need to abort with their own cause.
    #[error("Visitor failed on '{path}': {message}")]
    Visitor { path: String, message: String },
}

impl PathTreeError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        PathTreeError::InvalidPath {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_argument(path: &str, reason: impl Into<String>) -> Self {
        PathTreeError::InvalidArgument {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }

    /// Stable numeric code, used as a structured logging field and as the process exit status.
    pub fn code(&self) -> i32 {
        match self {
            PathTreeError::InvalidPath { .. } => 2,
            PathTreeError::InvalidArgument { .. } => 3,
            PathTreeError::BufferTooSmall { .. } => 4,
            PathTreeError::PathEscapesRoot { .. } => 5,
            PathTreeError::Os { .. } => 6,
            PathTreeError::OutOfMemory { .. } => 7,
            PathTreeError::Visitor { .. } => 8,
        }
    }

    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PathTreeError::InvalidPath { .. } => "invalid_path",
            PathTreeError::InvalidArgument { .. } => "invalid_argument",
            PathTreeError::BufferTooSmall { .. } => "buffer_too_small",
            PathTreeError::PathEscapesRoot { .. } => "path_escapes_root",
            PathTreeError::Os { .. } => "os_error",
            PathTreeError::OutOfMemory { .. } => "out_of_memory",
            PathTreeError::Visitor { .. } => "visitor_error",
        }
    }
}
