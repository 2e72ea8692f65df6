//! Page bodies as ordered text blocks.
//!
//! A [`PageContent`] is the markup text of a page split into one block per
//! line, each block keeping its trailing newline. [`PageContent::parse`] and
//! [`PageContent::render`] round-trip exactly, which is all the header
//! preservation logic needs from the wiki format.

use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Number of leading blocks that make up a page header: the title heading and
/// the creation-date line.
pub const HEADER_BLOCKS: usize = 2;

/// The body of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PageContent {
    blocks: Vec<String>,
}

impl PageContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits markup text into line blocks.
    ///
    /// ```
    /// use zimbib_notebook::PageContent;
    /// let content = PageContent::parse("====== Title ======\nCreated today\n\nBody");
    /// assert_eq!(content.blocks(), ["====== Title ======\n", "Created today\n", "\n", "Body"]);
    /// assert_eq!(content.render(), "====== Title ======\nCreated today\n\nBody");
    /// ```
    pub fn parse(text: &str) -> Self {
        Self { blocks: text.split_inclusive('\n').map(str::to_string).collect() }
    }

    /// Joins the blocks back into markup text.
    pub fn render(&self) -> String {
        self.blocks.concat()
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The leading [`HEADER_BLOCKS`] blocks (fewer if the page is shorter).
    pub fn header(&self) -> PageContent {
        Self { blocks: self.blocks.iter().take(HEADER_BLOCKS).cloned().collect() }
    }

    /// Everything after the header.
    pub fn body(&self) -> &[String] {
        &self.blocks[HEADER_BLOCKS.min(self.blocks.len())..]
    }

    /// Appends markup text, re-splitting it into line blocks.
    ///
    /// If the current last block has no trailing newline one is added first,
    /// so appended text always starts on a new line.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.blocks.last_mut()
            && !last.ends_with('\n')
        {
            last.push('\n');
        }
        self.blocks.extend(text.split_inclusive('\n').map(str::to_string));
    }

    /// Builder form of [`append`](Self::append).
    pub fn with(mut self, text: &str) -> Self {
        self.append(text);
        self
    }
}

impl FromStr for PageContent {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
impl Display for PageContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.blocks.iter().try_for_each(|b| f.write_str(b))
    }
}
