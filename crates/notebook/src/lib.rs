//! Page store abstraction for Zim notebooks.
//!
//! The synchronizer only ever needs to turn a string into a legal page name,
//! read a page and write it back. That surface is the [`Notebook`] trait;
//! [`LocalNotebook`] implements it on top of a Zim notebook directory.

pub mod backend;
mod content;
pub mod error;
pub mod markup;
mod name;
mod page;

pub use crate::backend::{LocalNotebook, Notebook, ReadOnlyNotebook};
#[cfg(any(test, feature = "mock"))]
pub use crate::backend::MockNotebook;
pub use crate::content::{HEADER_BLOCKS, PageContent};
pub use crate::name::{PageName, make_valid};
pub use crate::page::Page;
use std::sync::Arc;

pub type NotebookHandle = Arc<dyn Notebook + Send + Sync>;
