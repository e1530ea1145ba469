//! Inline style filtering.
//!
//! Each CSS declaration in a `style` attribute is checked against a pattern for
//! its property. Declarations with unknown properties or values that fail the
//! pattern are dropped; the rest are re-emitted as `property: value`.

use std::sync::LazyLock;

use regex::Regex;

const LENGTH: &str = r"\d+(\.\d+)?(px|em|rem|%|pt)?";

static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(#([0-9a-f]{3}|[0-9a-f]{6})|rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\))$")
        .expect("invalid color pattern")
});

static SINGLE_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^{LENGTH}$")).expect("invalid length pattern"));

static MARGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({LENGTH}|auto)(\s+({LENGTH}|auto)){{0,3}}$")).expect("invalid margin pattern")
});

static PADDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^{LENGTH}(\s+{LENGTH}){{0,3}}$")).expect("invalid padding pattern"));

static FONT_WEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(normal|bold|[1-9]00)$").expect("invalid font-weight pattern"));

static TEXT_ALIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(left|right|center|justify)$").expect("invalid text-align pattern"));

static TEXT_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(none|underline|line-through)$").expect("invalid text-decoration pattern"));

static DISPLAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(block|inline|inline-block|table|flex|none)$").expect("invalid display pattern")
});

/// Whether `value` is acceptable for `property`.
///
/// `property` must already be lowercase.
pub fn is_allowed(property: &str, value: &str) -> bool {
    match property {
        "color" | "background" | "background-color" => COLOR.is_match(value),
        "font-size" | "line-height" | "letter-spacing" => SINGLE_LENGTH.is_match(value),
        "margin" => MARGIN.is_match(value),
        "padding" => PADDING.is_match(value),
        "font-weight" => FONT_WEIGHT.is_match(value),
        "text-align" => TEXT_ALIGN.is_match(value),
        "text-decoration" => TEXT_DECORATION.is_match(value),
        "display" => DISPLAY.is_match(value),
        "border" => true,
        _ => false,
    }
}

/// Filter a `style` attribute value down to its allowed declarations.
///
/// Returns `None` when nothing survives, so the attribute can be removed.
pub fn filter_declarations(style: &str) -> Option<String> {
    let kept: Vec<String> = style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if value.is_empty() || !is_allowed(&property, value) {
                return None;
            }
            Some(format!("{property}: {value}"))
        })
        .collect();

    if kept.is_empty() { None } else { Some(kept.join("; ")) }
}
