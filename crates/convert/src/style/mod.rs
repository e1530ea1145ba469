//! Inline style injection.
//!
//! Sanitized HTML is parsed into an owned tree, every element with a rule in
//! [`table::RULES`] gets its `style` attribute overwritten and its classes
//! appended, and the tree is serialized back without newlines.

pub mod table;
pub mod tree;

pub use table::{RULES, StyleRule};
pub use tree::{Element, Node, NodeId, Tree};

use table::{BLOCKQUOTE_PARAGRAPH, INLINE_CODE, SPACER_MARKER, lookup};

/// Applies the fixed WeChat style table to HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleEngine;

impl StyleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Style a fragment and wrap it in the single outer `<section>` the
    /// editor expects.
    pub fn apply_styles(&self, html: &str) -> String {
        format!("<section>{}</section>", self.style_fragment(html))
    }

    /// Style a fragment without wrapping it.
    pub fn style_fragment(&self, html: &str) -> String {
        let mut tree = Tree::parse_fragment(html);
        self.style_tree(&mut tree);
        tree.serialize_compact()
    }

    /// Walk the tree depth first with an explicit stack of
    /// `(node, parent is pre, inside blockquote)` frames.
    fn style_tree(&self, tree: &mut Tree) {
        let mut stack: Vec<(NodeId, bool, bool)> = tree.roots().iter().rev().map(|&id| (id, false, false)).collect();

        while let Some((id, parent_is_pre, in_blockquote)) = stack.pop() {
            let Some(element) = tree.element_mut(id) else {
                continue;
            };

            self.style_element(element, parent_is_pre, in_blockquote);

            let is_pre = element.name == "pre";
            let in_blockquote = in_blockquote || element.name == "blockquote";
            stack.extend(element.children.iter().rev().map(|&child| (child, is_pre, in_blockquote)));
        }
    }

    fn style_element(&self, element: &mut Element, parent_is_pre: bool, in_blockquote: bool) {
        let rule = match element.name.as_str() {
            "p" => {
                if element.attr("style").is_some_and(|style| style.contains(SPACER_MARKER)) {
                    return;
                }
                if in_blockquote {
                    element.add_classes(&["p"]);
                    element.set_attr("style", BLOCKQUOTE_PARAGRAPH);
                    return;
                }
                lookup("p")
            }
            "code" if parent_is_pre => return,
            "code" => lookup(INLINE_CODE),
            name => lookup(name),
        };

        if let Some(rule) = rule {
            element.set_attr("style", rule.css);
            element.add_classes(rule.classes);
        }
    }
}
