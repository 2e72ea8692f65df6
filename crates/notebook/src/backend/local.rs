//! Zim notebook directory backend.
//!
//! Zim keeps one text file per page: `:References:S:Smith 2020` lives in
//! `References/S/Smith_2020.txt`. Every file starts with a small header block
//! (`Content-Type`, `Wiki-Format`, `Creation-Date`) separated from the wiki
//! text by a blank line.

use crate::content::PageContent;
use crate::error::{ErrorKind, Result};
use crate::markup::{now, timestamp};
use crate::name::PageName;
use crate::page::Page;
use crate::Notebook;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

const CONTENT_TYPE: &str = "Content-Type: text/x-zim-wiki";
const WIKI_FORMAT: &str = "Wiki-Format: zim 0.6";

/// Zim notebook stored in a directory on the local filesystem.
///
/// # Examples
///
/// ```no_run
/// use zimbib_notebook::LocalNotebook;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let notebook = LocalNotebook::new("Notes", "/home/me/Notebooks/Notes")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalNotebook {
    name: String,
    /// Root directory of the notebook
    root: PathBuf,
}
impl LocalNotebook {
    /// Opens (creating if needed) a notebook rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if the path is not
    /// absolute or exists but is not a directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            create_dir_all(&root).map_err(|e| Self::map_io_error(e, &root))?;
        }
        Ok(Self { name: name.into(), root })
    }

    /// File that stores the page `name`.
    pub fn file_path(&self, name: &PageName) -> PathBuf {
        let mut path = self.root.clone();
        let mut sections = name.sections().map(|s| s.replace(' ', "_")).peekable();
        while let Some(section) = sections.next() {
            match sections.peek() {
                Some(_) => path.push(section),
                None => path.push(format!("{section}.txt")),
            }
        }
        path
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }

    fn read(&self, path: &Path) -> Result<Option<String>> {
        match fs::read(path) {
            Ok(bytes) => {
                Ok(Some(String::from_utf8(bytes).map_err(|_| ErrorKind::Decode(path.to_path_buf()))?))
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::map_io_error(e, path).into()),
        }
    }
}

/// Splits a page file into its header block (including the blank separator
/// line) and the wiki text. Files without a Zim header are all body.
fn split_headers(text: &str) -> (Option<&str>, &str) {
    if !text.starts_with("Content-Type:") {
        return (None, text);
    }
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if line.trim().is_empty() {
            return (Some(&text[..offset]), &text[offset..]);
        }
    }
    (Some(text), "")
}

fn new_headers() -> String {
    format!("{CONTENT_TYPE}\n{WIKI_FORMAT}\nCreation-Date: {}\n\n", timestamp(now()))
}

impl Notebook for LocalNotebook {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_page(&self, name: &PageName) -> Result<Page> {
        let path = self.file_path(name);
        Ok(match self.read(&path)? {
            Some(text) => Page::new(name.clone(), PageContent::parse(split_headers(&text).1)),
            None => Page::empty(name.clone()),
        })
    }

    fn store_page(&self, page: &Page) -> Result<()> {
        let path = self.file_path(page.name());
        // Keep the original creation date when rewriting an existing page.
        let headers = self
            .read(&path)?
            .and_then(|text| split_headers(&text).0.map(str::to_string))
            .unwrap_or_else(new_headers);
        if let Some(parent) = path.parent() {
            create_dir_all(parent).map_err(|e| Self::map_io_error(e, parent))?;
        }
        tracing::debug!(notebook = %self.name, page = %page.name(), path = %path.display(), "Storing page");
        fs::write(&path, format!("{headers}{}", page.body().render())).map_err(|e| Self::map_io_error(e, &path))?;
        Ok(())
    }
}
