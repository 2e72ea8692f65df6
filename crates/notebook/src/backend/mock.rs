//! In-memory notebook for testing.

use crate::content::PageContent;
use crate::error::{ErrorKind, Result};
use crate::name::PageName;
use crate::page::Page;
use crate::Notebook;
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

/// In-memory notebook for testing.
///
/// Pages are stored in a `HashMap` behind a [`RwLock`], so all trait methods
/// can operate on `&self`. Every successful store is counted per page, and
/// individual pages can be configured to be [rejected](Self::rejecting), which
/// is how tests simulate a page store refusing one write in a batch.
#[derive(Debug)]
pub struct MockNotebook {
    name: String,
    pages: RwLock<HashMap<PageName, PageContent>>,
    writes: RwLock<HashMap<PageName, usize>>,
    rejected: HashSet<PageName>,
}

impl MockNotebook {
    /// Create a mock notebook pre-populated with pages (name, markup text).
    ///
    /// Panics if any name fails validation. If test setup is wrong, then the
    /// test should not pass.
    pub fn with_pages(pages: impl IntoIterator<Item = (impl AsRef<str>, impl AsRef<str>)>) -> Self {
        let mut map = HashMap::new();
        for (name, text) in pages {
            let Ok(validated) = PageName::new(name.as_ref()) else {
                panic!("MockNotebook::with_pages: invalid page name {:?}", name.as_ref());
            };
            map.insert(validated, PageContent::parse(text.as_ref()));
        }
        Self {
            name: "mock".to_string(),
            pages: RwLock::new(map),
            writes: RwLock::new(HashMap::new()),
            rejected: HashSet::new(),
        }
    }

    /// Makes every store of the page `name` fail with [`ErrorKind::Rejected`].
    ///
    /// Panics if `name` is not a valid page name.
    pub fn rejecting(mut self, name: &str) -> Self {
        let Ok(validated) = PageName::new(name) else {
            panic!("MockNotebook::rejecting: invalid page name {name:?}");
        };
        self.rejected.insert(validated);
        self
    }

    /// Current body of a page, if it was ever stored or pre-populated.
    pub fn content(&self, name: &PageName) -> Option<PageContent> {
        self.pages.read().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
    }

    /// Number of successful stores of `name`.
    pub fn writes(&self, name: &PageName) -> usize {
        self.writes.read().unwrap_or_else(PoisonError::into_inner).get(name).copied().unwrap_or(0)
    }

    /// Number of successful stores across all pages.
    pub fn total_writes(&self) -> usize {
        self.writes.read().unwrap_or_else(PoisonError::into_inner).values().sum()
    }

    /// Names of every page currently held, sorted.
    pub fn page_names(&self) -> Vec<PageName> {
        let mut names: Vec<_> = self.pages.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect();
        names.sort();
        names
    }
}
impl Default for MockNotebook {
    fn default() -> Self {
        let pages: [(&str, &str); 0] = [];
        Self::with_pages(pages)
    }
}

impl Notebook for MockNotebook {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_page(&self, name: &PageName) -> Result<Page> {
        let body = self.content(name).unwrap_or_default();
        Ok(Page::new(name.clone(), body))
    }

    fn store_page(&self, page: &Page) -> Result<()> {
        if self.rejected.contains(page.name()) {
            exn::bail!(ErrorKind::Rejected(page.name().clone()));
        }
        self.pages.write().unwrap_or_else(PoisonError::into_inner).insert(page.name().clone(), page.body().clone());
        *self.writes.write().unwrap_or_else(PoisonError::into_inner).entry(page.name().clone()).or_default() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PageName {
        PageName::new(s).unwrap()
    }

    #[test]
    fn test_store_and_get() {
        let notebook = MockNotebook::default();
        let mut page = notebook.get_page(&name(":Home")).unwrap();
        assert!(!page.has_content());
        page.set_body(PageContent::parse("hello\n"));
        notebook.store_page(&page).unwrap();
        assert_eq!(notebook.get_page(&name(":Home")).unwrap().body().render(), "hello\n");
        assert_eq!(notebook.writes(&name(":Home")), 1);
    }

    #[test]
    fn test_get_page_is_idempotent() {
        let notebook = MockNotebook::with_pages([(":Home", "hello\n")]);
        let first = notebook.get_page(&name(":Home")).unwrap();
        let second = notebook.get_page(&name(":Home")).unwrap();
        assert_eq!(first, second);
        assert_eq!(notebook.total_writes(), 0);
    }

    #[test]
    fn test_rejecting() {
        let notebook = MockNotebook::default().rejecting(":Bad");
        let page = Page::new(name(":Bad"), PageContent::parse("x"));
        let err = notebook.store_page(&page).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Rejected(n) if n.as_str() == ":Bad"));
        assert_eq!(notebook.writes(&name(":Bad")), 0);
        assert!(notebook.content(&name(":Bad")).is_none());
    }

    #[test]
    fn test_page_names_sorted() {
        let notebook = MockNotebook::with_pages([(":B", ""), (":A", "")]);
        assert_eq!(notebook.page_names(), [name(":A"), name(":B")]);
    }

    #[test]
    #[should_panic(expected = "invalid page name")]
    fn test_with_pages_panics_on_bad_name() {
        MockNotebook::with_pages([(":a/b", "")]);
    }
}
