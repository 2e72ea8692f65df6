use time::Date;
use zimbib_notebook::markup::{created, heading};
use zimbib_notebook::{Page, PageContent};

/// The header a rewritten page starts with.
///
/// An existing page keeps its first blocks (title heading and creation date)
/// verbatim, whatever they contain. A new page gets a title heading with
/// `title` and a `Created` line for `today`.
pub fn header(page: &Page, title: &str, today: Date) -> PageContent {
    if page.has_content() {
        page.body().header()
    } else {
        PageContent::new().with(&heading(1, title)).with(&created(today))
    }
}

/// Header followed by a freshly rendered body.
pub fn compose(page: &Page, title: &str, today: Date, body: &str) -> PageContent {
    header(page, title, today).with(body)
}
