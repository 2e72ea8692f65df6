//! Notebook Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use crate::name::PageName;
use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A notebook error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for notebook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The string cannot be turned into a legal page name.
    #[display("not a valid page name: {_0:?}")]
    InvalidName(#[error(not(source))] String),
    /// Notebook root is not usable (relative, or not a directory).
    #[display("invalid notebook path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// Access denied.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error.
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// A page file is not valid UTF-8.
    #[display("page file is not valid UTF-8: {}", _0.display())]
    Decode(#[error(not(source))] PathBuf),
    /// The notebook refused to store the page.
    #[display("page rejected by notebook: {_0}")]
    Rejected(#[error(not(source))] PageName),
    /// Backend-specific error.
    #[display("backend error: {_0}")]
    BackendError(#[error(not(source))] String),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::BackendError(_))
    }
}
