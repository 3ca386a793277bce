//! EPUB package parsing (container.xml and OPF).

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::events::attributes::Attribute;

use super::text::decode_entity;
use crate::book::Metadata;
use crate::error::{Error, Result};

/// A manifest entry: archive-relative href and declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub href: String,
    pub media_type: String,
}

/// Parsed OPF package data.
#[derive(Debug, Default)]
pub struct OpfData {
    pub metadata: Metadata,
    /// Maps manifest id -> item
    pub manifest: HashMap<String, ManifestItem>,
    /// Manifest ids in reading order.
    pub spine_ids: Vec<String>,
}

/// Parse META-INF/container.xml to find the OPF path.
pub fn parse_container_xml(content: &str) -> Result<String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if local_name(e.name().as_ref()) == b"rootfile" => {
                if let Some(path) = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.as_ref() == b"full-path")
                    .map(|attr| attr_value(&attr))
                {
                    return Ok(path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Err(Error::InvalidEpub(
        "no rootfile found in container.xml".to_string(),
    ))
}

/// Parse the OPF package document: Dublin Core metadata, manifest, spine.
pub fn parse_opf(content: &str) -> Result<OpfData> {
    // Text is trimmed per field; trimming events would eat the spaces
    // around entity references.
    let mut reader = Reader::from_str(content);
    reader.config_mut().allow_dangling_amp = true;

    let mut opf = OpfData::default();
    let mut title: Option<String> = None;

    let mut in_metadata = false;
    let mut current: Option<DcField> = None;
    let mut buf_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"metadata" => in_metadata = true,
                b"title" if in_metadata => {
                    current = Some(DcField::Title);
                    buf_text.clear();
                }
                b"creator" if in_metadata => {
                    current = Some(DcField::Creator);
                    buf_text.clear();
                }
                _ => record_package_entry(&e, &mut opf),
            },
            Event::Empty(e) => record_package_entry(&e, &mut opf),
            Event::Text(e) => {
                if current.is_some() {
                    buf_text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::GeneralRef(e) => {
                if current.is_some() {
                    buf_text.push_str(&resolve_entity(&String::from_utf8_lossy(e.as_ref())));
                }
            }
            Event::End(e) => {
                if local_name(e.name().as_ref()) == b"metadata" {
                    in_metadata = false;
                }
                match current.take() {
                    // The first title is the book's title; later ones are subtitles.
                    Some(DcField::Title) if title.is_none() => {
                        title = Some(buf_text.trim().to_string())
                    }
                    Some(DcField::Creator) => opf.metadata.authors.push(buf_text.trim().to_string()),
                    _ => {}
                }
                buf_text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    opf.metadata.title = title.unwrap_or_default();
    Ok(opf)
}

/// Record a manifest `item` or spine `itemref`; other elements are ignored.
fn record_package_entry(e: &BytesStart<'_>, opf: &mut OpfData) {
    match local_name(e.name().as_ref()) {
        b"item" => {
            let mut id = String::new();
            let mut item = ManifestItem {
                href: String::new(),
                media_type: String::new(),
            };
            for attr in e.attributes().flatten() {
                match attr.key.as_ref() {
                    b"id" => id = attr_value(&attr),
                    b"href" => item.href = attr_value(&attr),
                    b"media-type" => item.media_type = attr_value(&attr),
                    _ => {}
                }
            }
            if !id.is_empty() {
                opf.manifest.insert(id, item);
            }
        }
        b"itemref" => {
            if let Some(idref) = e
                .attributes()
                .flatten()
                .find(|attr| attr.key.as_ref() == b"idref")
            {
                opf.spine_ids.push(attr_value(&idref));
            }
        }
        _ => {}
    }
}

#[derive(Debug, Clone, Copy)]
enum DcField {
    Title,
    Creator,
}

fn attr_value(attr: &Attribute<'_>) -> String {
    String::from_utf8_lossy(attr.value.as_ref()).into_owned()
}

/// Extract local name from namespaced XML name (e.g., "dc:title" -> "title").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve an entity reference to its text.
///
/// XML built-ins and numeric references are handled directly; other names
/// go through the HTML entity table, and unknown ones are kept verbatim.
fn resolve_entity(entity: &str) -> String {
    let builtin = match entity {
        "apos" => Some('\''),
        "quot" => Some('"'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        _ => None,
    };

    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        builtin
    };

    match code {
        Some(c) => c.to_string(),
        None => decode_entity(entity),
    }
}
