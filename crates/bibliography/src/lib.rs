//! Loading of BibTeX bibliographies into [`Library`] values.
//!
//! Parsing is delegated to the [`biblatex`] crate; this crate resolves the
//! source path, reads the file, converts entries into ordered [`Record`]s and
//! derives the summary metadata (entry count, group labels, load timestamp).

pub mod error;
pub mod models;
mod parse;
mod source;

use tracing::instrument;

use crate::error::{ErrorKind, Result};
pub use crate::models::{Field, Library, Record, derive_groups, group_of};
pub use crate::parse::parse;
pub use crate::source::expand_home;

/// Easy, top-level entrypoint: expand, read and parse the bibliography at
/// `source` (a path as configured, `~` allowed).
///
/// Either the whole file loads or an error is returned; a partially parsed
/// library is never produced.
#[instrument(fields(path))]
pub fn load(source: &str) -> Result<Library> {
    if source.trim().is_empty() {
        exn::bail!(ErrorKind::MissingSource);
    }
    let path = expand_home(source)?;
    tracing::Span::current().record("path", tracing::field::display(path.display()));
    tracing::debug!("Importing bibliography (this might take a while)");
    let text = source::read(&path)?;
    let records = parse(&text)?;
    let library = Library::new(source, path, records)?;
    tracing::debug!(entries = library.len(), name = %library.name(), "Loaded bibliography");
    Ok(library)
}
