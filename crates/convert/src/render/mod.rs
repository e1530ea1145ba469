//! Markdown rendering.
//!
//! Turns author Markdown into raw, untrusted HTML. Inline and block HTML in the
//! source is passed through untouched; the sanitizer owns safety.

use comrak::{Options, markdown_to_html};

/// Options for rendering Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Replace straight quotes and `--`/`---` with typographic ones.
    pub typographer: bool,

    /// Turn bare `https://` and `www.` URLs into links.
    pub linkify: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { typographer: true, linkify: true }
    }
}

/// Renderer trait for Markdown to HTML conversion.
///
/// Implementations never fail: every string, including the empty one, renders
/// to some (possibly empty) HTML fragment.
pub trait Renderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// CommonMark + GFM renderer backed by comrak.
#[derive(Debug, Clone, Default)]
pub struct ComrakRenderer {
    options: RenderOptions,
}

impl ComrakRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::default();
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = self.options.linkify;
        options.parse.smart = self.options.typographer;
        options.render.r#unsafe = true;

        markdown_to_html(markdown, &options)
    }
}
