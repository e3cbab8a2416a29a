//! Slug derivation for pages created without an explicit slug

use regex::Regex;
use std::sync::LazyLock;

// Literal patterns: `Regex::new` cannot fail on them.
static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("literal slug pattern"));
static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("literal slug pattern"));

/// Lower-case, drop non-word characters, join words with `-`.
///
/// `\w` is Unicode-aware, so Hangul and other scripts survive.
pub fn derive_slug(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let stripped = STRIP.replace_all(&lowered, "");
    SPACES.replace_all(stripped.trim(), "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(STRIP.is_match("!"));
        assert!(SPACES.is_match(" \t"));
    }

    #[test]
    fn test_ascii_title() {
        assert_eq!(derive_slug("Summer Bootcamp 2024!"), "summer-bootcamp-2024");
    }

    #[test]
    fn test_hangul_title() {
        assert_eq!(derive_slug("신규 페이지!!"), "신규-페이지");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(derive_slug("  Yoga   &  Pilates  "), "yoga-pilates");
    }

    #[test]
    fn test_hyphens_and_underscores_kept() {
        assert_eq!(derive_slug("HIIT-class_v2"), "hiit-class_v2");
    }

    #[test]
    fn test_punctuation_only_is_empty() {
        assert_eq!(derive_slug("!!!"), "");
    }
}
