//! Page names and the page-name sanitizer.
//!
//! Zim addresses pages with colon-separated paths such as
//! `:References:S:Smith2020`. Each section must start with a letter or digit
//! and may not contain any of `? # / \ * " < > | %`, tabs or line breaks.

use crate::error::{ErrorKind, Result};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Characters that may never appear in a page name section.
const ILLEGAL: [char; 13] = ['?', '#', '/', '\\', '*', '"', '<', '>', '|', '%', '\t', '\n', '\r'];

/// An absolute, validated page name.
///
/// Always stored with a leading `:`. Construct with [`PageName::new`] (strict,
/// rejects anything illegal) or [`make_valid`] (lenient, cleans the input up).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageName(String);

impl PageName {
    /// Validates `name` without modifying it (apart from adding the leading `:`).
    ///
    /// ```
    /// use zimbib_notebook::PageName;
    /// assert_eq!(PageName::new("References:S").unwrap().as_str(), ":References:S");
    /// assert!(PageName::new(":References::S").is_err());
    /// assert!(PageName::new(":a/b").is_err());
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        let trimmed = name.strip_prefix(':').unwrap_or(name);
        if trimmed.is_empty() || !trimmed.split(':').all(is_valid_section) {
            exn::bail!(ErrorKind::InvalidName(name.to_string()));
        }
        Ok(Self(format!(":{trimmed}")))
    }

    /// Full name, including the leading `:`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sections from the top of the tree downwards.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.0[1..].split(':')
    }

    /// Returns `true` if `self` lives (at any depth) below `namespace`.
    pub fn is_below(&self, namespace: &PageName) -> bool {
        self.0.len() > namespace.0.len()
            && self.0.starts_with(&namespace.0)
            && self.0.as_bytes()[namespace.0.len()] == b':'
    }
}

impl FromStr for PageName {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}
impl AsRef<str> for PageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Display for PageName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

fn is_valid_section(section: &str) -> bool {
    section.chars().next().is_some_and(char::is_alphanumeric)
        && section.trim_end() == section
        && !section.contains(ILLEGAL)
}

/// Turns an arbitrary string into a legal page name.
///
/// This is the notebook's sanitizer contract:
/// 1. empty sections are dropped, so repeated `:` collapse and leading or
///    trailing `:` are ignored;
/// 2. the characters `? # / \ * " < > | %`, tabs and line breaks are removed;
/// 3. `_` becomes a space;
/// 4. non-alphanumeric characters at the start of a section are removed, and
///    each section is trimmed.
///
/// A section that was non-empty but is left empty by steps 2-4 is an error,
/// never silently dropped, so a sanitized name keeps the depth of its input.
///
/// ```
/// use zimbib_notebook::make_valid;
/// assert_eq!(make_valid("::References::S:smith_2020:").unwrap().as_str(), ":References:S:smith 2020");
/// assert_eq!(make_valid(":References:A:a/b").unwrap().as_str(), ":References:A:ab");
/// assert!(make_valid(":References:?:???").is_err());
/// ```
pub fn make_valid(raw: &str) -> Result<PageName> {
    let mut sections = Vec::new();
    for section in raw.split(':').filter(|s| !s.is_empty()) {
        let cleaned = clean_section(section);
        if cleaned.is_empty() {
            exn::bail!(ErrorKind::InvalidName(raw.to_string()));
        }
        sections.push(cleaned);
    }
    if sections.is_empty() {
        exn::bail!(ErrorKind::InvalidName(raw.to_string()));
    }
    Ok(PageName(format!(":{}", sections.join(":"))))
}

fn clean_section(section: &str) -> String {
    let cleaned: String =
        section.chars().filter(|c| !ILLEGAL.contains(c)).map(|c| if c == '_' { ' ' } else { c }).collect();
    cleaned.trim_start_matches(|c: char| !c.is_alphanumeric()).trim_end().to_string()
}
