use std::fmt;

use tracing::{debug, info};

use crate::document::{Document, Page, PageIndex};
use crate::error::Result;
use crate::import::TextSource;
use crate::paginate::{PagerConfig, Paginator};

/// Book metadata as reported by a text source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub authors: Vec<String>,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// All authors joined into a single display string.
    pub fn author(&self) -> String {
        self.authors.join(", ")
    }
}

/// Reading position summary for a reader on a given page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Pages up to and including the current one.
    pub pages_read: usize,
    /// Words on those pages.
    pub words_read: usize,
    /// `pages_read` as a share of the page count, in percent.
    pub percentage: f64,
}

/// A paginated book: metadata plus random access to its pages.
///
/// ```
/// use spritz::{BookHandle, MemorySource, Metadata, PagerConfig};
///
/// let source = MemorySource::new(Metadata::new("Fables").with_author("Aesop"))
///     .with_chapter("The fox and the grapes.");
/// let book = BookHandle::from_source(&source, PagerConfig::default()).unwrap();
///
/// assert_eq!(book.page_count(), 1);
/// assert_eq!(book.get_page(1), "The fox and the grapes.");
/// assert_eq!(book.get_page(2), "");
/// assert_eq!(book.to_string(), "Aesop - Fables");
/// ```
#[derive(Debug, Clone)]
pub struct BookHandle {
    document: Document,
}

impl BookHandle {
    /// Paginate every chapter of `source` in order.
    ///
    /// The only possible failure is an invalid `config`.
    pub fn from_source<S: TextSource + ?Sized>(source: &S, config: PagerConfig) -> Result<Self> {
        let mut paginator = Paginator::new(config)?;
        for (index, chapter) in source.chapters().iter().enumerate() {
            paginator.feed(chapter)?;
            debug!(chapter = index, pages = paginator.page_count(), "fed chapter");
        }
        let pages = paginator.finish()?;

        let metadata = source.metadata();
        let document = Document::new(metadata.title.clone(), metadata.author(), pages);
        info!(
            title = document.title(),
            chapters = source.chapters().len(),
            pages = document.page_count(),
            "paginated book"
        );

        Ok(Self::from_document(document))
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn title(&self) -> &str {
        self.document.title()
    }

    pub fn author(&self) -> &str {
        self.document.author()
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// Text of the 1-based page `n`; `""` when out of range.
    pub fn get_page(&self, n: i64) -> &str {
        self.document.get_page(n)
    }

    pub fn page(&self, index: PageIndex) -> Option<&Page> {
        self.document.page(index)
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.document.word_count()
    }

    /// Progress of a reader positioned on page `n`.
    ///
    /// `n` is clamped to `[0, page_count]`, so positions before the first
    /// page read nothing and positions past the end read everything.
    pub fn progress(&self, n: i64) -> Progress {
        let total = self.page_count();
        let pages_read = usize::try_from(n.max(0)).unwrap_or(usize::MAX).min(total);
        let words_read = self.document.pages()[..pages_read]
            .iter()
            .map(Page::word_count)
            .sum();
        let percentage = if total == 0 {
            0.0
        } else {
            pages_read as f64 * 100.0 / total as f64
        };

        Progress {
            pages_read,
            words_read,
            percentage,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl fmt::Display for BookHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.author(), self.title())
    }
}
