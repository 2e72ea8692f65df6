//! Notebook trait and implementations.
//!
//! This module defines the [`Notebook`] trait, the narrow page store interface
//! the synchronizer talks to, plus a Zim directory backend, a read-only
//! decorator and (behind the `mock` feature) an in-memory backend for tests.

mod local;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod ro;

pub use self::local::LocalNotebook;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockNotebook;
pub use self::ro::ReadOnlyNotebook;
use crate::error::Result;
use crate::name::{PageName, make_valid};
use crate::page::Page;

/// Unified interface for page stores.
///
/// Only what a read-modify-write pass over pages needs: turn a raw string
/// into a legal [`PageName`], fetch a page, and store it again. Access is
/// synchronous and sequential; implementations only need interior locking to
/// be shareable behind a [`NotebookHandle`](crate::NotebookHandle).
///
/// # Examples
///
/// ```
/// use zimbib_notebook::{Notebook, PageContent, error::Result};
///
/// fn append_line(notebook: &dyn Notebook, raw: &str, line: &str) -> Result<()> {
///     let name = notebook.make_valid_name(raw)?;
///     let mut page = notebook.get_page(&name)?;
///     let body = page.body().clone().with(line);
///     page.set_body(body);
///     notebook.store_page(&page)
/// }
/// ```
pub trait Notebook: Send + Sync {
    /// Name of the notebook (used for logging only).
    fn name(&self) -> &str;

    /// Sanitizes a raw, colon-separated name into a legal [`PageName`].
    ///
    /// Defaults to [`make_valid`]; see there for the exact rule.
    fn make_valid_name(&self, raw: &str) -> Result<PageName> {
        make_valid(raw)
    }

    /// Fetches a page.
    ///
    /// Never fails because a page is missing: a page that does not exist yet
    /// is returned empty ([`Page::has_content`] is `false`). Repeated calls
    /// with the same name address the same logical page.
    fn get_page(&self, name: &PageName) -> Result<Page>;

    /// Creates or replaces the page's body.
    fn store_page(&self, page: &Page) -> Result<()>;

    /// Check if a page exists with content.
    fn exists(&self, name: &PageName) -> Result<bool> {
        Ok(self.get_page(name)?.has_content())
    }
}
