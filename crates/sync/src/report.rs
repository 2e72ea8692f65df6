//! Outcome of a synchronization pass.

use crate::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use zimbib_notebook::PageName;

/// A page that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The page had no content before.
    Created(PageName),
    /// The page existed; its header was kept and the rest rewritten.
    Updated(PageName),
}
impl Action {
    pub(crate) fn for_page(name: PageName, existed: bool) -> Self {
        if existed { Self::Updated(name) } else { Self::Created(name) }
    }

    pub fn page(&self) -> &PageName {
        match self {
            Self::Created(name) | Self::Updated(name) => name,
        }
    }
}

/// A record that could not be written.
#[derive(Debug)]
pub struct Failure {
    pub key: String,
    /// Target page, when a name could be derived.
    pub page: Option<PageName>,
    pub error: Error,
}
impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.page {
            Some(page) => write!(f, "{} ({page}): {}", self.key, *self.error),
            None => write!(f, "{}: {}", self.key, *self.error),
        }
    }
}

/// Everything a pass wrote and everything it skipped.
///
/// Its [`Display`] is the single notification shown once the pass is done.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub actions: Vec<Action>,
    pub failures: Vec<Failure>,
}
impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn created(&self) -> usize {
        self.actions.iter().filter(|a| matches!(a, Action::Created(_))).count()
    }

    pub fn updated(&self) -> usize {
        self.actions.iter().filter(|a| matches!(a, Action::Updated(_))).count()
    }

    pub(crate) fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub(crate) fn fail(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    pub(crate) fn extend(&mut self, other: SyncReport) {
        self.actions.extend(other.actions);
        self.failures.extend(other.failures);
    }
}
impl Display for SyncReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let written = self.actions.len();
        write!(f, "Wrote {written} page{} ({} created, {} updated)", plural(written), self.created(), self.updated())?;
        if !self.failures.is_empty() {
            let failed = self.failures.len();
            write!(f, "\n{failed} entr{} failed:", if failed == 1 { "y" } else { "ies" })?;
            for failure in &self.failures {
                write!(f, "\n  {failure}")?;
            }
        }
        Ok(())
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
