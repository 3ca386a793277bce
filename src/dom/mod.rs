//! Minimal HTML document tree for text extraction.
//!
//! Chapter markup is parsed with html5ever into a flat arena of nodes. Only
//! what text extraction needs is kept: element names, text and the
//! parent/child structure.

mod tree_sink;

pub(crate) use tree_sink::DomSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::QualName;

/// Index of a node in a [`TextDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
pub(crate) enum NodeData {
    Document,
    Element(QualName),
    Text(String),
    /// Comments, doctypes and processing instructions.
    Other,
}

#[derive(Debug)]
pub(crate) struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena-allocated document tree. Node 0 is the document.
#[derive(Debug)]
pub(crate) struct TextDom {
    nodes: Vec<Node>,
}

impl TextDom {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parse an HTML or XHTML document. Never fails; malformed markup is
    /// repaired the way browsers repair it.
    pub fn parse(html: &str) -> Self {
        parse_document(DomSink::new(), ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
    }

    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn element_name(&self, id: NodeId) -> Option<&QualName> {
        match &self.nodes[id.0].data {
            NodeData::Element(name) => Some(name),
            _ => None,
        }
    }

    pub fn create(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Append text, merging into a trailing text node if there is one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(&last) = self.nodes[parent.0].children.last()
            && let NodeData::Text(existing) = &mut self.nodes[last.0].data
        {
            existing.push_str(text);
            return;
        }
        let id = self.create(NodeData::Text(text.to_string()));
        self.append(parent, id);
    }

    /// Insert `node` immediately before `sibling`. A sibling without a
    /// parent leaves `node` detached.
    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) {
        self.detach(node);
        let Some(parent) = self.nodes[sibling.0].parent else {
            return;
        };
        let siblings = &mut self.nodes[parent.0].children;
        let at = siblings
            .iter()
            .position(|&c| c == sibling)
            .unwrap_or(siblings.len());
        siblings.insert(at, node);
        self.nodes[node.0].parent = Some(parent);
    }

    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Move every child of `from` to the end of `to`.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        let children = std::mem::take(&mut self.nodes[from.0].children);
        for &child in &children {
            self.nodes[child.0].parent = Some(to);
        }
        self.nodes[to.0].children.extend(children);
    }
}

impl Default for TextDom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(dom: &TextDom, tag: &str) -> Option<NodeId> {
        let mut stack = vec![dom.document()];
        while let Some(id) = stack.pop() {
            if dom.element_name(id).is_some_and(|n| n.local.as_ref() == tag) {
                return Some(id);
            }
            stack.extend(dom.children(id).iter().rev());
        }
        None
    }

    #[test]
    fn test_basic_parse() {
        let dom = TextDom::parse("<html><body><p>Hello</p></body></html>");

        let p = find(&dom, "p").expect("should find p");
        let text = dom.children(p)[0];
        assert!(matches!(&dom.get(text).data, NodeData::Text(t) if t == "Hello"));
        assert_eq!(dom.get(p).parent, find(&dom, "body"));
    }

    #[test]
    fn test_adjacent_text_is_merged() {
        let mut dom = TextDom::new();
        let root = dom.document();
        dom.append_text(root, "one ");
        dom.append_text(root, "two");

        assert_eq!(dom.children(root).len(), 1);
        assert!(matches!(&dom.get(dom.children(root)[0]).data, NodeData::Text(t) if t == "one two"));
    }

    #[test]
    fn test_misnested_markup_keeps_all_text() {
        let dom = TextDom::parse("<body><p><b>bold <i>both</b> italic</i></p></body>");
        let p = find(&dom, "p").expect("should find p");

        let mut text = String::new();
        let mut stack = vec![p];
        while let Some(id) = stack.pop() {
            if let NodeData::Text(t) = &dom.get(id).data {
                text.push_str(t);
            }
            stack.extend(dom.children(id).iter().rev());
        }
        assert_eq!(text, "bold both italic");
    }

    #[test]
    fn test_insert_before_and_reparent() {
        let mut dom = TextDom::new();
        let root = dom.document();
        let a = dom.create(NodeData::Other);
        let b = dom.create(NodeData::Other);
        let c = dom.create(NodeData::Other);
        dom.append(root, b);
        dom.insert_before(b, a);
        assert_eq!(dom.children(root), [a, b]);

        dom.reparent_children(root, c);
        assert!(dom.children(root).is_empty());
        assert_eq!(dom.children(c), [a, b]);
        assert_eq!(dom.get(a).parent, Some(c));
    }
}
