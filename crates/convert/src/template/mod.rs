//! Template binding for the `template_bound` pipeline mode.
//!
//! A template is an HTML file inside the configured template directory. The
//! first `<section>...</section>` block is the splice point; everything around
//! it is kept byte for byte.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use wxmd_core::Error;

static SECTION_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<section\b[^>]*>).*?</section\s*>").expect("invalid section regex"));

/// Loads templates from a directory and splices fragments into them.
#[derive(Debug, Clone)]
pub struct TemplateBinder {
    template_dir: PathBuf,
}

impl TemplateBinder {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self { template_dir: template_dir.into() }
    }

    /// Resolve a template name to a path inside the template directory.
    ///
    /// Absolute names and names with `..`, root or prefix components are
    /// rejected as not found.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, Error> {
        let relative = Path::new(name);
        let is_plain = !name.trim().is_empty()
            && relative.components().all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

        if !is_plain {
            return Err(Error::TemplateNotFound(name.to_string()));
        }

        Ok(self.template_dir.join(relative))
    }

    /// Read a template as UTF-8 text.
    pub fn load(&self, name: &str) -> Result<String, Error> {
        let path = self.resolve(name)?;
        fs::read_to_string(&path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load template");
            Error::TemplateNotFound(format!("{}: {e}", path.display()))
        })
    }

    /// Load the named template and splice `fragment` into it.
    pub fn apply(&self, name: &str, fragment: &str) -> Result<String, Error> {
        let template = self.load(name)?;
        Ok(splice(&template, fragment))
    }
}

/// Replace the contents of the first `<section>` block in `template` with
/// `fragment`.
///
/// The block keeps its own opening tag. Without a section block the fragment
/// is wrapped in a bare `<section>` and the template is not used.
pub fn splice(template: &str, fragment: &str) -> String {
    match SECTION_BLOCK.captures(template) {
        Some(captures) => {
            let (Some(block), Some(open)) = (captures.get(0), captures.get(1)) else {
                return format!("<section>{fragment}</section>");
            };
            let mut out = String::with_capacity(template.len() + fragment.len());
            out.push_str(&template[..block.start()]);
            out.push_str(open.as_str());
            out.push_str(fragment);
            out.push_str("</section>");
            out.push_str(&template[block.end()..]);
            out
        }
        None => {
            tracing::debug!("Template has no section block, wrapping fragment directly");
            format!("<section>{fragment}</section>")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHELL: &str = "<!DOCTYPE html>\n<html>\n<body>\n  <div class=\"wrap\">\n    <section class=\"content\">\n      placeholder\n    </section>\n  </div>\n</body>\n</html>\n";

    #[test]
    fn test_splice_replaces_block() {
        let html = splice(SHELL, "<p>new</p>");
        assert!(html.contains("<section class=\"content\"><p>new</p></section>"));
        assert!(!html.contains("placeholder"));
    }

    #[test]
    fn test_splice_preserves_shell() {
        let html = splice(SHELL, "<p>new</p>");
        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<body>\n  <div class=\"wrap\">\n    "));
        assert!(html.ends_with("\n  </div>\n</body>\n</html>\n"));
    }

    #[test]
    fn test_splice_first_block_only() {
        let template = "<section>a</section><section>b</section>";
        assert_eq!(splice(template, "x"), "<section>x</section><section>b</section>");
    }

    #[test]
    fn test_splice_case_insensitive() {
        assert_eq!(splice("<SECTION id=\"s\">old</SECTION>", "x"), "<SECTION id=\"s\">x</section>");
    }

    #[test]
    fn test_splice_without_section() {
        assert_eq!(splice("<div>no splice point</div>", "<p>x</p>"), "<section><p>x</p></section>");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let binder = TemplateBinder::new("/srv/templates");
        assert!(matches!(binder.resolve("../secret.html"), Err(Error::TemplateNotFound(_))));
        assert!(matches!(binder.resolve("a/../../b.html"), Err(Error::TemplateNotFound(_))));
        assert!(matches!(binder.resolve("/etc/passwd"), Err(Error::TemplateNotFound(_))));
        assert!(matches!(binder.resolve(""), Err(Error::TemplateNotFound(_))));
    }

    #[test]
    fn test_resolve_nested_name() {
        let binder = TemplateBinder::new("/srv/templates");
        assert_eq!(binder.resolve("themes/red.html").unwrap(), PathBuf::from("/srv/templates/themes/red.html"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let binder = TemplateBinder::new(dir.path());
        let err = binder.load("missing.html").unwrap_err();
        assert_eq!(err.code(), "TEMPLATE_NOT_FOUND");
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn test_apply_reads_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wechat.html"), SHELL).unwrap();
        let binder = TemplateBinder::new(dir.path());
        let html = binder.apply("wechat.html", "<h1>T</h1>").unwrap();
        assert!(html.contains("<section class=\"content\"><h1>T</h1></section>"));
        assert!(html.contains("<div class=\"wrap\">"));
    }
}
