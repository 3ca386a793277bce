//! Text sources feeding the paginator.
//!
//! A [`TextSource`] hands over already-extracted chapter text in reading
//! order together with the book's metadata. Reading archives and stripping
//! markup happens here, before any text reaches the pagination core.

mod epub;

pub use epub::EpubSource;

use crate::book::Metadata;

/// Ordered plain-text chapters plus metadata.
pub trait TextSource {
    fn metadata(&self) -> &Metadata;

    /// Chapter texts in reading order.
    fn chapters(&self) -> &[String];
}

/// A source backed by chapters supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    metadata: Metadata,
    chapters: Vec<String>,
}

impl MemorySource {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            chapters: Vec::new(),
        }
    }

    pub fn with_chapter(mut self, text: impl Into<String>) -> Self {
        self.chapters.push(text.into());
        self
    }

    pub fn push_chapter(&mut self, text: impl Into<String>) {
        self.chapters.push(text.into());
    }
}

impl TextSource for MemorySource {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn chapters(&self) -> &[String] {
        &self.chapters
    }
}
