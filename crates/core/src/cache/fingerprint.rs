//! Content-addressed cache key generation.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::request::ConvertOptions;

/// Hex-encoded SHA-256 digest identifying one conversion request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the cache key for a markdown document and its options.
///
/// Each field is length-prefixed and absent options hash differently from
/// empty ones, so no two distinct requests share an encoding.
pub fn compute_fingerprint(markdown: &str, options: &ConvertOptions) -> Fingerprint {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, Some(markdown));
    update_field(&mut hasher, options.title.as_deref());
    update_field(&mut hasher, options.author.as_deref());
    update_field(&mut hasher, options.template.as_deref());
    Fingerprint(hex::encode(hasher.finalize()))
}

fn update_field(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(value) => {
            hasher.update([1u8]);
            hasher.update((value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        None => hasher.update([0u8]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(title: Option<&str>, author: Option<&str>) -> ConvertOptions {
        ConvertOptions { title: title.map(Into::into), author: author.map(Into::into), template: None }
    }

    #[test]
    fn test_fingerprint_stability() {
        let a = compute_fingerprint("# Test", &ConvertOptions::default());
        let b = compute_fingerprint("# Test", &ConvertOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_different_markdown() {
        let a = compute_fingerprint("# Test 1", &ConvertOptions::default());
        let b = compute_fingerprint("# Test 2", &ConvertOptions::default());
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_different_options() {
        let a = compute_fingerprint("# Test", &options(Some("A"), None));
        let b = compute_fingerprint("# Test", &options(Some("B"), None));
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_absent_vs_empty() {
        let absent = compute_fingerprint("# Test", &options(None, None));
        let empty = compute_fingerprint("# Test", &options(Some(""), None));
        assert_ne!(absent, empty);
    }

    #[test]
    fn test_fingerprint_field_boundaries() {
        // Moving bytes between fields must change the key.
        let a = compute_fingerprint("ab", &options(Some("c"), None));
        let b = compute_fingerprint("a", &options(Some("bc"), None));
        assert_ne!(a, b);

        let c = compute_fingerprint("x", &options(Some("y"), None));
        let d = compute_fingerprint("x", &options(None, Some("y")));
        assert_ne!(c, d);
    }

    #[test]
    fn test_fingerprint_format() {
        let key = compute_fingerprint("# Test", &ConvertOptions::default());
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key.to_string(), key.as_str());
    }
}
