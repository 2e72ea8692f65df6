use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::header::compose;
use crate::report::Action;
use exn::ResultExt;
use tracing::instrument;
use zimbib_bibliography::Library;
use zimbib_notebook::Notebook;

/// Title given to a root page that does not exist yet.
pub const ROOT_TITLE: &str = "References";

/// Rewrites the root page with the library statistics and the folder index.
///
/// The page is read once and written once. Any failure is fatal for the pass.
#[instrument(skip_all, fields(root = %ctx.root, library = %library.name()))]
pub fn update_root(notebook: &dyn Notebook, ctx: &Context, library: &Library) -> Result<Action> {
    let mut page = notebook.get_page(&ctx.root).map_err(ErrorKind::notebook).or_raise(|| root_error(ctx))?;
    let existed = page.has_content();
    let body = ctx.templates.summary(library).or_raise(|| root_error(ctx))?;
    page.set_body(compose(&page, ROOT_TITLE, ctx.today, &body));
    notebook.store_page(&page).map_err(ErrorKind::notebook).or_raise(|| root_error(ctx))?;
    tracing::debug!(groups = library.groups().len(), "Generated statistics for {}", library.source);
    Ok(Action::for_page(ctx.root.clone(), existed))
}

fn root_error(ctx: &Context) -> ErrorKind {
    ErrorKind::RootPage(ctx.root.to_string())
}
