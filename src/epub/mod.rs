//! EPUB container parsing: package document and chapter text.

mod parser;
mod text;

pub use parser::{ManifestItem, OpfData, parse_container_xml, parse_opf};
pub use text::extract_text;
