//! Read-only notebook decorator.
//!
//! Wraps another notebook and prevents writes from executing, while still
//! indicating success on return. Used for dry runs.

use crate::error::Result;
use crate::name::PageName;
use crate::page::Page;
use crate::{Notebook, NotebookHandle};

/// Read-only notebook.
///
/// Reads (and name sanitization) go to the inner notebook; every write is
/// dropped and logged as an [`info event`](tracing::Event).
#[derive(Clone)]
pub struct ReadOnlyNotebook {
    inner: NotebookHandle,
}
impl ReadOnlyNotebook {
    pub fn new(inner: NotebookHandle) -> Self {
        Self { inner }
    }
}

impl Notebook for ReadOnlyNotebook {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn make_valid_name(&self, raw: &str) -> Result<PageName> {
        self.inner.make_valid_name(raw)
    }

    fn get_page(&self, name: &PageName) -> Result<Page> {
        self.inner.get_page(name)
    }

    fn store_page(&self, page: &Page) -> Result<()> {
        tracing::info!(page = %page.name(), blocks = page.body().len(), "Skipping write during read-only mode");
        Ok(())
    }

    fn exists(&self, name: &PageName) -> Result<bool> {
        self.inner.exists(name)
    }
}
