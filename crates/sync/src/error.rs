//! Synchronization Error Types
//!
//! Fatal kinds ([`Config`](ErrorKind::Config), [`Load`](ErrorKind::Load),
//! [`RootPage`](ErrorKind::RootPage)) abort a pass. The rest are per-record and
//! end up in a [`Failure`](crate::Failure) while the batch carries on.

use derive_more::{Display, Error};
use zimbib_bibliography::error::Error as LoadError;
use zimbib_config::error::Error as ConfigError;
use zimbib_notebook::PageName;
use zimbib_notebook::error::Error as NotebookError;

/// A synchronization error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for synchronization operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("invalid configuration: {_0}")]
    Config(#[error(not(source))] String),
    #[display("could not load bibliography: {_0}")]
    Load(#[error(not(source))] String),
    /// The root summary page could not be read or written.
    #[display("could not update root page {_0}")]
    RootPage(#[error(not(source))] String),
    /// A key cannot be turned into a page name.
    #[display("no valid page name for {_0:?}")]
    Name(#[error(not(source))] String),
    #[display("notebook error: {_0}")]
    Notebook(#[error(not(source))] String),
    #[display("could not render {_0} template")]
    Template(#[error(not(source))] &'static str),
    /// Another key of the same pass already maps to this page.
    #[display("page {page} is already used by {other:?}")]
    Collision { page: PageName, other: String },
}

impl ErrorKind {
    /// Wraps a configuration error, keeping its tree as a child.
    #[track_caller]
    pub fn config(err: ConfigError) -> Error {
        let reason = (*err).to_string();
        err.raise(ErrorKind::Config(reason))
    }

    /// Wraps a bibliography load error, keeping its tree as a child.
    #[track_caller]
    pub fn load(err: LoadError) -> Error {
        let reason = (*err).to_string();
        err.raise(ErrorKind::Load(reason))
    }

    /// Wraps a notebook error, keeping its tree as a child.
    #[track_caller]
    pub fn notebook(err: NotebookError) -> Error {
        let reason = (*err).to_string();
        err.raise(ErrorKind::Notebook(reason))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Notebook(_))
    }
}
