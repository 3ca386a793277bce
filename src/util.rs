//! Shared helpers for decoding archive entries.

use std::borrow::Cow;

/// Decode bytes to a string.
///
/// UTF-8 is tried first (a BOM is handled by `encoding_rs`). Malformed
/// input is decoded with the hint encoding, typically taken from the XML
/// declaration, and otherwise as Windows-1252, which old ebooks often use.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Encoding name from an XML declaration such as
/// `<?xml version="1.0" encoding="iso-8859-1"?>`.
///
/// Only the first 100 bytes are inspected.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(100)];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let (&quote, value) = after_enc.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let end = value.iter().position(|&b| b == quote)?;
    std::str::from_utf8(&value[..end]).ok()
}

/// Decode an archive entry, honoring its XML declaration.
pub fn decode_xml_entry(bytes: &[u8]) -> Cow<'_, str> {
    decode_text(bytes, extract_xml_encoding(bytes))
}
