//! URL slug derivation for blog posts.
//!
//! Titles may contain non-ASCII text (Cyrillic in particular); slugs are the
//! transliterated, lowercase, hyphen-separated ASCII form.

/// Derive a slug from a title. Deterministic: the same title always yields
/// the same slug.
pub fn slugify(title: &str) -> String {
    slug::slugify(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_title() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_cyrillic_title_transliterated() {
        assert_eq!(slugify("Привет Мир"), "privet-mir");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(slugify("Новая версия 2.0"), slugify("Новая версия 2.0"));
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }
}
