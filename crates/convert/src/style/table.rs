//! The WeChat style table.

/// Inline style and classes applied to one kind of element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: &'static str,
    pub css: &'static str,
    pub classes: &'static [&'static str],
}

/// Style for `<p>` elements nested anywhere inside a `<blockquote>`.
///
/// Replaces the plain paragraph style and adds no classes.
pub const BLOCKQUOTE_PARAGRAPH: &str = "font-size: 1em; letter-spacing: 0.1em; margin-top: 0px; margin-bottom: 0px;";

/// Paragraphs whose existing style contains this are spacers and keep their style.
pub const SPACER_MARKER: &str = "font-size: 0px";

/// Selector for inline code (a `<code>` not directly inside `<pre>`).
pub const INLINE_CODE: &str = "code.inline";

pub const RULES: &[StyleRule] = &[
    StyleRule {
        selector: "h1",
        css: "display: table; padding: 0px 1em; border-bottom: 2px solid rgb(250, 81, 81); margin-right: auto; margin-bottom: 1em; margin-left: auto; color: rgb(63, 63, 63); font-size: 19.2px; text-align: center; margin-top: 0px !important;",
        classes: &["h1"],
    },
    StyleRule {
        selector: "h2",
        css: "display: table; padding: 0px 0.2em; margin: 4em auto 2em; color: rgb(255, 255, 255); background: rgb(250, 81, 81); font-size: 19.2px; text-align: center;",
        classes: &["h2"],
    },
    StyleRule {
        selector: "h3",
        css: "padding-left: 8px; border-left: 3px solid rgb(250, 81, 81); margin: 2em 8px 0.75em 0px; color: rgb(63, 63, 63); font-size: 17.6px; line-height: 1.2;",
        classes: &["h3"],
    },
    StyleRule { selector: "h4", css: "margin: 2em 8px 0.5em; color: rgb(250, 81, 81);", classes: &["h4"] },
    StyleRule { selector: "p", css: "margin: 1.5em 8px; letter-spacing: 0.1em; color: rgb(63, 63, 63);", classes: &["p"] },
    StyleRule {
        selector: "blockquote",
        css: "padding: 1em; border-left: 4px solid rgb(250, 81, 81); border-radius: 6px; color: rgb(63, 63, 63); background: rgb(247, 247, 247); margin-bottom: 1em;",
        classes: &["blockquote"],
    },
    StyleRule {
        selector: INLINE_CODE,
        css: "font-size: 14.4px; color: rgb(221, 17, 68); background: rgba(27, 31, 35, 0.05); padding: 3px 5px; border-radius: 4px;",
        classes: &["codespan"],
    },
    StyleRule {
        selector: "pre",
        css: "color: rgb(201, 209, 217); background-color: rgb(13, 17, 23); font-size: 14.4px; overflow-x: auto; line-height: 1.5; margin: 10px 8px; padding: 0px !important;",
        classes: &["hljs", "code__pre"],
    },
    StyleRule { selector: "ul", css: "list-style-type: circle;", classes: &["ul", "list-paddingleft-2"] },
    StyleRule { selector: "ol", css: "padding-left: 1em; color: rgb(63, 63, 63);", classes: &["ol", "list-paddingleft-2"] },
    StyleRule { selector: "li", css: "margin: 0.5em 0;", classes: &[] },
    StyleRule { selector: "strong", css: "color: rgb(250, 81, 81); font-weight: bold; font-size: inherit;", classes: &["strong"] },
    StyleRule { selector: "em", css: "font-size: inherit;", classes: &["em"] },
    StyleRule { selector: "a", css: "color: rgb(87, 107, 149); text-decoration-line: none;", classes: &[] },
    StyleRule { selector: "table", css: "border-collapse: collapse; width: 100%; margin: 1.5em 0;", classes: &["preview-table"] },
    StyleRule {
        selector: "th",
        css: "border-color: rgb(223, 223, 223); padding: 0.25em 0.5em; word-break: keep-all; background: rgba(0, 0, 0, 0.05); font-weight: bold;",
        classes: &["th"],
    },
    StyleRule {
        selector: "td",
        css: "border-color: rgb(223, 223, 223); padding: 0.25em 0.5em; word-break: keep-all;",
        classes: &["td"],
    },
    StyleRule { selector: "hr", css: "border: none; border-top: 1px solid rgb(223, 223, 223); margin: 2em 0;", classes: &[] },
];

/// Find the rule for a selector.
pub fn lookup(selector: &str) -> Option<&'static StyleRule> {
    RULES.iter().find(|rule| rule.selector == selector)
}
