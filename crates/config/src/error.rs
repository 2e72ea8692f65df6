//! Configuration Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Every variant aborts the action before the bibliography is touched.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No bibliography file was configured.
    #[display("no bibliography file configured (set `bibfile`)")]
    MissingBibfile,
    /// The root namespace cannot be turned into a page name.
    #[display("invalid root page: {_0:?}")]
    InvalidRoot(#[error(not(source))] String),
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The configuration sources could not be read or merged.
    #[display("failed to load configuration")]
    Load,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
