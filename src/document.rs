//! Sealed, randomly addressable page collections.

use std::fmt;
use std::num::NonZeroUsize;

/// One page of text.
///
/// Counts are derived from the text on demand; a page stores nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Page {
    text: String,
}

impl Page {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in chars, the unit the page budget is measured in.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A 1-based page ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(NonZeroUsize);

impl PageIndex {
    /// First page of every document.
    pub const FIRST: PageIndex = PageIndex(NonZeroUsize::MIN);

    /// Build an index from a 1-based ordinal. Zero and negatives have no index.
    pub fn new(ordinal: i64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(PageIndex)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    fn offset(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finished pagination output: pages in reading order plus book metadata.
///
/// A document is built once from the pages of a finished
/// [`Paginator`](crate::Paginator) and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    author: String,
    pages: Vec<Page>,
}

impl Document {
    pub fn new(title: impl Into<String>, author: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            pages,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: PageIndex) -> Option<&Page> {
        self.pages.get(index.offset())
    }

    /// Text of the 1-based page `n`, or `""` when `n` is out of range.
    pub fn get_page(&self, n: i64) -> &str {
        PageIndex::new(n)
            .and_then(|index| self.page(index))
            .map(Page::text)
            .unwrap_or("")
    }

    /// True when no page carries any text.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty)
    }

    pub fn word_count(&self) -> usize {
        self.pages.iter().map(Page::word_count).sum()
    }
}
