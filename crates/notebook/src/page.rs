use crate::content::PageContent;
use crate::name::PageName;

/// A handle on one page: its name and its current body.
///
/// Obtained from [`Notebook::get_page`](crate::Notebook::get_page), modified
/// with [`set_body`](Self::set_body) and written back with
/// [`Notebook::store_page`](crate::Notebook::store_page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    name: PageName,
    body: PageContent,
}
impl Page {
    pub fn new(name: PageName, body: PageContent) -> Self {
        Self { name, body }
    }

    /// A page that does not exist yet.
    pub fn empty(name: PageName) -> Self {
        Self::new(name, PageContent::new())
    }

    pub fn name(&self) -> &PageName {
        &self.name
    }

    /// `true` when the page already has a body in the notebook.
    pub fn has_content(&self) -> bool {
        !self.body.is_empty()
    }

    pub fn body(&self) -> &PageContent {
        &self.body
    }

    pub fn set_body(&mut self, body: PageContent) {
        self.body = body;
    }
}
