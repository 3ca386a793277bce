//! # spritz
//!
//! Whitespace-safe pagination of ebook text.
//!
//! Chapter text is cut into pages of roughly `words_per_page *
//! average_word_length` characters. Pages only ever end at whitespace, so
//! no word is split across two pages, and every page can be fetched by its
//! 1-based number.
//!
//! ## Quick Start
//!
//! ```no_run
//! use spritz::PagerConfig;
//!
//! let book = spritz::open("book.epub", PagerConfig::default()).unwrap();
//! println!("{book}: {} pages", book.page_count());
//! println!("{}", book.get_page(1));
//! ```
//!
//! ## Paginating Your Own Text
//!
//! Any [`TextSource`] can be paginated; [`MemorySource`] holds chapters
//! supplied directly:
//!
//! ```
//! use spritz::{BookHandle, MemorySource, Metadata, PagerConfig};
//!
//! let source = MemorySource::new(Metadata::new("Notes").with_author("Me"))
//!     .with_chapter("aaaaa bbbbb ccccc ddddd");
//! let config = PagerConfig::new(2, 5).unwrap();
//! let book = BookHandle::from_source(&source, config).unwrap();
//!
//! assert_eq!(book.page_count(), 3);
//! assert_eq!(book.get_page(1), "aaaaa bbbbb");
//! assert_eq!(book.get_page(2), "ccccc ddddd");
//! assert_eq!(book.get_page(3), "");
//! ```

pub mod book;
pub mod document;
pub(crate) mod dom;
pub mod epub;
pub mod error;
pub mod import;
pub mod paginate;
pub(crate) mod util;

use std::path::Path;

pub use book::{BookHandle, Metadata, Progress};
pub use document::{Document, Page, PageIndex};
pub use error::{Error, Result};
pub use import::{EpubSource, MemorySource, TextSource};
pub use paginate::{PagerConfig, Paginator};

/// Read an EPUB file and paginate its text.
pub fn open(path: impl AsRef<Path>, config: PagerConfig) -> Result<BookHandle> {
    let source = EpubSource::open(path)?;
    BookHandle::from_source(&source, config)
}
