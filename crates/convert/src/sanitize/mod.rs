//! HTML sanitization.
//!
//! Filters rendered HTML down to a fixed tag, attribute and inline-style
//! allowlist using ammonia:
//!
//! - Disallowed tags are unwrapped: the tag goes, its text stays.
//! - `script` and `style` are dropped together with their content.
//! - Only `http`, `https`, `mailto` and the other ammonia default URL schemes survive.
//! - `style` attributes are reduced to the declarations accepted by [`css`].

pub mod css;

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use ammonia::Builder;

/// Safe structural and inline tags.
const BASE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "blockquote", "br", "caption", "cite", "code", "col", "colgroup", "data", "dd",
    "del", "dfn", "dl", "dt", "em", "hr", "i", "ins", "kbd", "li", "mark", "ol", "p", "pre", "q", "rp", "rt", "ruby",
    "s", "samp", "small", "strong", "sub", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "time", "tr", "u",
    "ul", "var", "wbr",
];

/// Tags the publishing platform needs on top of the base set.
const EXTRA_TAGS: &[&str] = &["img", "h1", "h2", "h3", "h4", "h5", "h6", "section", "center", "span"];

/// Attributes allowed on every tag.
const GENERIC_ATTRIBUTES: &[&str] = &["class", "style", "id"];

/// Attributes allowed on specific tags.
const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "target"]),
    ("img", &["src", "alt", "title", "style"]),
    ("section", &["class"]),
    ("ol", &["start"]),
    ("td", &["align", "colspan", "rowspan"]),
    ("th", &["align", "colspan", "rowspan"]),
];

/// Allowlist-based HTML sanitizer.
///
/// Build once and share; cleaning takes `&self`.
pub struct Sanitizer {
    builder: Builder<'static>,
}

impl Sanitizer {
    pub fn new() -> Self {
        let tags: HashSet<&'static str> = BASE_TAGS.iter().chain(EXTRA_TAGS).copied().collect();
        let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = TAG_ATTRIBUTES
            .iter()
            .map(|(tag, attributes)| (*tag, attributes.iter().copied().collect()))
            .collect();

        let mut builder = Builder::default();
        builder
            .tags(tags)
            .tag_attributes(tag_attributes)
            .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
            .link_rel(None)
            .attribute_filter(filter_attribute);

        Self { builder }
    }

    /// Sanitize untrusted HTML. Input that is entirely unsafe yields an empty string.
    pub fn sanitize(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

fn filter_attribute<'u>(_element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    if attribute == "style" { css::filter_declarations(value).map(Cow::Owned) } else { Some(Cow::Borrowed(value)) }
}
