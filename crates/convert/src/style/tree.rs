//! Owned, mutable element tree.
//!
//! Sanitized HTML is parsed with scraper (html5ever) and copied into a flat
//! arena that can be restyled in place and serialized back to a compact
//! string. Parsing, walking, serializing and dropping never recurse, so
//! nesting depth is bounded only by memory.

use scraper::{ElementRef, Html};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Index of a node in its [`Tree`].
pub type NodeId = usize;

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and child ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<NodeId>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any previous value. Attributes stay sorted by name.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.binary_search_by(|(key, _)| key.as_str().cmp(name)) {
            Ok(index) => self.attrs[index].1 = value.to_string(),
            Err(index) => self.attrs.insert(index, (name.to_string(), value.to_string())),
        }
    }

    /// Append classes that are not already present.
    pub fn add_classes(&mut self, classes: &[&str]) {
        if classes.is_empty() {
            return;
        }
        let mut current: Vec<String> = self
            .attr("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        for class in classes {
            if !current.iter().any(|c| c == class) {
                current.push((*class).to_string());
            }
        }
        self.set_attr("class", &current.join(" "));
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

/// Arena of nodes plus the ids of the top-level ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

enum Frame {
    Open { id: NodeId, in_pre: bool, last: bool },
    Close(NodeId),
}

impl Tree {
    /// Parse an HTML fragment.
    ///
    /// Attributes are sorted by name so serialization is deterministic.
    /// Comments and doctypes are dropped.
    pub fn parse_fragment(html: &str) -> Self {
        let document = Html::parse_fragment(html);
        let mut tree = Tree::default();

        let mut stack: Vec<_> = document.root_element().children().rev().map(|child| (child, None)).collect();
        while let Some((source, parent)) = stack.pop() {
            let node = if let Some(element) = ElementRef::wrap(source) {
                let value = element.value();
                let mut attrs: Vec<(String, String)> = value
                    .attrs()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect();
                attrs.sort_by(|a, b| a.0.cmp(&b.0));
                Node::Element(Element { name: value.name().to_string(), attrs, children: Vec::new() })
            } else if let Some(text) = source.value().as_text() {
                let text: &str = text;
                Node::Text(text.to_string())
            } else {
                continue;
            };

            let is_element = matches!(node, Node::Element(_));
            let id = tree.push(node, parent);
            if is_element {
                stack.extend(source.children().rev().map(|child| (child, Some(id))));
            }
        }

        tree
    }

    fn push(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        match parent.and_then(|p| self.element_mut(p)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id) {
            Some(Node::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Serialize without newlines.
    ///
    /// Whitespace-only text containing a line break is dropped, other line
    /// breaks become spaces, and inside `<pre>` they become `<br>` so code
    /// keeps its lines.
    pub fn serialize_compact(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<Frame> =
            self.roots.iter().rev().map(|&id| Frame::Open { id, in_pre: false, last: false }).collect();

        while let Some(frame) = stack.pop() {
            let (id, in_pre, last) = match frame {
                Frame::Open { id, in_pre, last } => (id, in_pre, last),
                Frame::Close(id) => {
                    if let Node::Element(element) = &self.nodes[id] {
                        out.push_str("</");
                        out.push_str(&element.name);
                        out.push('>');
                    }
                    continue;
                }
            };

            let element = match &self.nodes[id] {
                Node::Text(text) => {
                    write_text(&mut out, text, in_pre, last);
                    continue;
                }
                Node::Element(element) => element,
            };

            out.push('<');
            out.push_str(&element.name);
            for (key, value) in &element.attrs {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                escape_into(&mut out, value, true);
                out.push('"');
            }
            out.push('>');

            if element.is_void() {
                continue;
            }

            stack.push(Frame::Close(id));
            let in_pre = in_pre || element.name == "pre";
            let count = element.children.len();
            for (i, &child) in element.children.iter().enumerate().rev() {
                stack.push(Frame::Open { id: child, in_pre, last: i + 1 == count });
            }
        }

        out
    }
}

fn write_text(out: &mut String, text: &str, in_pre: bool, last: bool) {
    if in_pre {
        let trimmed = if last { text.strip_suffix('\n').unwrap_or(text) } else { text };
        for (i, line) in trimmed.split('\n').enumerate() {
            if i > 0 {
                out.push_str("<br>");
            }
            escape_into(out, line, false);
        }
        return;
    }

    if text.contains('\n') && text.trim().is_empty() {
        return;
    }
    escape_into(out, &text.replace('\n', " "), false);
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}
