//! Bibliography Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Any error raised here means the
//! library could not be loaded at all; no partial [`Library`](crate::Library)
//! is ever handed out.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A bibliography error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for bibliography operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No source path was given.
    #[display("no bibliography file configured")]
    MissingSource,
    /// The path starts with `~` but the home directory could not be determined.
    #[display("could not determine the home directory to expand: {}", _0.display())]
    NoHomeDirectory(#[error(not(source))] PathBuf),
    /// File does not exist.
    #[display("bibliography file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error.
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// The file is not valid UTF-8.
    #[display("bibliography file is not valid UTF-8: {}", _0.display())]
    Decode(#[error(not(source))] PathBuf),
    /// The parser rejected the file.
    #[display("malformed BibTeX at line {line}, column {column}: {message}")]
    Syntax {
        /// One-based line of the offending input.
        line: usize,
        /// One-based column (in characters) of the offending input.
        column: usize,
        /// Parser description of the problem.
        message: String,
    },
    /// An entry has an empty citation key.
    #[display("entry #{_0} has an empty citation key")]
    EmptyKey(#[error(not(source))] usize),
    /// Two entries share a citation key.
    #[display("duplicate citation key: {_0}")]
    DuplicateKey(#[error(not(source))] String),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The file is either there and well-formed, or it isn't. Only an
        // interrupted read is worth a second attempt.
        matches!(self, Self::Io(_))
    }
}
