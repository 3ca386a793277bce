//! Plain-text extraction from XHTML content documents.

use crate::dom::{NodeData, NodeId, TextDom};

/// Elements whose content is never part of the readable text.
const SKIPPED: &[&str] = &["head", "script", "style", "title", "template"];

/// Elements that end a line of text.
const BLOCKS: &[&str] = &[
    "p", "div", "br", "li", "tr", "blockquote", "section", "h1", "h2", "h3", "h4", "h5", "h6",
    "pre", "hr",
];

enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

/// Collect the readable text of an XHTML document.
///
/// The markup is parsed as HTML, so stray `&` characters, unclosed tags and
/// the full set of named character references are handled as a browser
/// would. Text nodes are concatenated in document order. Block-level
/// elements contribute a newline when the text would otherwise run
/// together, so adjacent paragraphs stay separate words.
pub fn extract_text(content: &str) -> String {
    let dom = TextDom::parse(content);
    let mut out = String::new();
    let mut stack = vec![Step::Enter(dom.document())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => match &dom.get(id).data {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Element(name) => {
                    let tag = name.local.as_ref();
                    if SKIPPED.contains(&tag) {
                        continue;
                    }
                    if BLOCKS.contains(&tag) {
                        break_line(&mut out);
                        stack.push(Step::Leave(id));
                    }
                    stack.extend(dom.children(id).iter().rev().map(|&c| Step::Enter(c)));
                }
                NodeData::Document => {
                    stack.extend(dom.children(id).iter().rev().map(|&c| Step::Enter(c)));
                }
                NodeData::Other => {}
            },
            Step::Leave(_) => break_line(&mut out),
        }
    }

    out
}

/// Decode a named or numeric character reference (without `&` and `;`)
/// using the HTML entity table. Unknown references come back verbatim.
pub(crate) fn decode_entity(name: &str) -> String {
    extract_text(&format!("&{name};"))
}

fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push('\n');
    }
}
