//! Error types for spritz operations.

use thiserror::Error;

/// Errors that can occur while paginating a book or reading its source.
///
/// Only [`Error::Config`] and [`Error::Sequencing`] come out of the
/// pagination core. The remaining variants belong to the text sources in
/// [`crate::import`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid pager configuration: {0}")]
    Config(String),

    #[error("Paginator already finished; no more text can be fed")]
    Sequencing,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid EPUB: {0}")]
    InvalidEpub(String),
}

pub type Result<T> = std::result::Result<T, Error>;
