//! EPUB text source.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use percent_encoding::percent_decode_str;
use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::book::Metadata;
use crate::epub::{OpfData, extract_text, parse_container_xml, parse_opf};
use crate::error::{Error, Result};
use crate::import::TextSource;
use crate::util::decode_xml_entry;

const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Largest buffer reserved ahead of reading an archive entry.
const MAX_PREALLOC: u64 = 1 << 20;

/// Media types of spine items that carry chapter text.
const TEXT_MEDIA_TYPES: &[&str] = &["application/xhtml+xml", "text/html"];

/// Chapter text and metadata read from an EPUB archive.
///
/// All archive access happens in the constructors; once built, the source
/// only hands out text.
#[derive(Debug, Clone)]
pub struct EpubSource {
    metadata: Metadata,
    chapters: Vec<String>,
}

impl EpubSource {
    /// Read metadata and the text of every spine chapter.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        Self::from_reader(file, true)
    }

    /// Read only the metadata, skipping chapter extraction.
    pub fn open_metadata(path: impl AsRef<Path>) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        Self::from_reader(file, false)
    }

    /// Read an archive held in memory.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes.as_ref()), true)
    }

    /// Read an archive from any seekable reader. With `parse_text` unset the
    /// source carries metadata and no chapters.
    pub fn from_reader<R: Read + Seek>(reader: R, parse_text: bool) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let container = read_entry(&mut archive, CONTAINER_PATH)?;
        let opf_path = parse_container_xml(&decode_xml_entry(&container))?;
        let opf_dir = opf_path
            .rsplit_once('/')
            .map(|(dir, _)| dir.to_string())
            .unwrap_or_default();

        let opf_bytes = read_entry(&mut archive, &opf_path)?;
        let opf = parse_opf(&decode_xml_entry(&opf_bytes))?;
        debug!(
            opf = %opf_path,
            title = %opf.metadata.title,
            spine = opf.spine_ids.len(),
            "parsed package document"
        );

        let chapters = if parse_text {
            read_chapters(&mut archive, &opf, &opf_dir)?
        } else {
            Vec::new()
        };

        Ok(Self {
            metadata: opf.metadata,
            chapters,
        })
    }
}

impl TextSource for EpubSource {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn chapters(&self) -> &[String] {
        &self.chapters
    }
}

/// Extract the text of every textual spine item, in spine order.
///
/// Items that are missing from the archive are skipped with a warning.
/// Chapter markup is parsed leniently, so malformed documents still yield
/// their text.
fn read_chapters<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    opf: &OpfData,
    opf_dir: &str,
) -> Result<Vec<String>> {
    let mut chapters = Vec::with_capacity(opf.spine_ids.len());

    for idref in &opf.spine_ids {
        let Some(item) = opf.manifest.get(idref) else {
            warn!(idref = %idref, "spine item missing from manifest");
            continue;
        };
        if !TEXT_MEDIA_TYPES.contains(&item.media_type.as_str()) {
            debug!(idref = %idref, media_type = %item.media_type, "skipping non-text spine item");
            continue;
        }

        let path = resolve_href(opf_dir, &item.href);
        let bytes = match read_entry(archive, &path) {
            Ok(bytes) => bytes,
            Err(Error::Zip(ZipError::FileNotFound)) => {
                warn!(path = %path, "spine item missing from archive");
                continue;
            }
            Err(e) => return Err(e),
        };

        let text = extract_text(&decode_xml_entry(&bytes));
        chapters.push(text.trim_end().to_string());
    }

    Ok(chapters)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(path)?;
    // The declared size is untrusted; cap the up-front reservation.
    let mut data = Vec::with_capacity(file.size().min(MAX_PREALLOC) as usize);
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Resolve a manifest href against the OPF directory into an archive path.
///
/// The href is percent-decoded, its fragment dropped and `.`/`..`
/// segments normalized.
fn resolve_href(base_dir: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);
    let decoded = percent_decode_str(href).decode_utf8_lossy();

    let mut segments: Vec<&str> = if decoded.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}
