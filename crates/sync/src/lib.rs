//! Writes a BibTeX library into a Zim notebook.
//!
//! A pass loads the library, then (depending on [`Mode`]) rewrites the root
//! summary page and writes one page per entry below it:
//!
//! ```text
//! :References                 library statistics and folder index
//! :References:S:Smith2020     @article, then one line per field
//! ```
//!
//! Every page keeps its title and creation date across passes; everything
//! below them is regenerated, so repeated passes over an unchanged file only
//! differ in the timestamp on the root page.

mod entries;
pub mod error;
mod header;
mod report;
mod summary;
mod template;

use crate::error::{ErrorKind, Result};
pub use crate::entries::{import_entries, raw_page_name};
pub use crate::header::{compose, header};
pub use crate::report::{Action, Failure, SyncReport};
pub use crate::summary::{ROOT_TITLE, update_root};
pub use crate::template::{DEFAULT_TEMPLATE_ENTRY, DEFAULT_TEMPLATE_SUMMARY, Templates, single_line};
use exn::ResultExt;
use time::Date;
use tracing::instrument;
use zimbib_config::Config;
use zimbib_notebook::markup::now;
use zimbib_notebook::{Notebook, PageName};

/// Which parts of the notebook a pass rewrites.
///
/// The two behaviours are independent toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    /// Rewrite the root summary page.
    pub summary: bool,
    /// Write one page per entry.
    pub entries: bool,
}
impl Mode {
    pub const SUMMARY: Self = Self { summary: true, entries: false };
    pub const ENTRIES: Self = Self { summary: false, entries: true };
    pub const ALL: Self = Self { summary: true, entries: true };
}
impl Default for Mode {
    fn default() -> Self {
        Self::SUMMARY
    }
}

/// Everything a pass needs besides the notebook and the bibliography.
pub struct Context {
    pub root: PageName,
    pub templates: Templates,
    pub mode: Mode,
    /// Date used for the `Created` line of new pages.
    pub today: Date,
}
impl Context {
    pub fn new(root: PageName, templates: Templates) -> Self {
        Self { root, templates, mode: Mode::default(), today: now().date() }
    }

    /// Validates `config` and builds the context it describes.
    ///
    /// Template overrides are compiled here, so a broken one fails as a
    /// configuration error before the bibliography is read.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().map_err(ErrorKind::config)?;
        let root = config.root_page().map_err(ErrorKind::config)?;
        let templates = Templates::new(config.templates.summary.as_deref(), config.templates.entry.as_deref())
            .or_raise(|| ErrorKind::Config("invalid template override".to_string()))?;
        let mode = Mode { summary: config.summary, entries: config.entries };
        Ok(Self::new(root, templates).with_mode(mode))
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_today(mut self, today: Date) -> Self {
        self.today = today;
        self
    }
}

/// Loads the bibliography at `source` and applies it to `notebook`.
///
/// # Errors
///
/// Fails only when nothing sensible can be written: the library does not
/// load, or the root page cannot be updated. Per-entry problems are collected
/// in the returned [`SyncReport`].
#[instrument(skip_all, fields(notebook = notebook.name(), root = %ctx.root, source = source))]
pub fn synchronize(notebook: &dyn Notebook, ctx: &Context, source: &str) -> Result<SyncReport> {
    let library = zimbib_bibliography::load(source).map_err(ErrorKind::load)?;
    let mut report = SyncReport::new();
    if ctx.mode.summary {
        report.push(update_root(notebook, ctx, &library)?);
    }
    if ctx.mode.entries {
        report.extend(import_entries(notebook, ctx, &library));
    }
    tracing::info!(written = report.actions.len(), failed = report.failures.len(), "Synchronized {}", library.name());
    Ok(report)
}
