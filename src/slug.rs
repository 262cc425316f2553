//! URL slug generation for products.
//!
//! A slug is the lowercased, hyphen-separated form of the product name with
//! a short random suffix so that repeated names never collide on the unique
//! slug column.

use rand::Rng;

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Normalize a name into its slug base: lowercase, runs of anything outside
/// `[a-z0-9]` collapse into a single hyphen, edges trimmed. Non-ASCII
/// characters are dropped like punctuation, keeping slugs pure ASCII.
///
/// `"Dell 7480!"` becomes `"dell-7480"`.
#[must_use]
pub fn base_slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    out
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Build a unique-enough slug for a new product: the normalized base plus a
/// 6-character base36 suffix. A name with no usable characters yields just
/// the suffix.
#[must_use]
pub fn generate(name: &str) -> String {
    let base = base_slug(name);
    let suffix = random_suffix();

    if base.is_empty() {
        suffix
    } else {
        format!("{base}-{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_slug_lowercases_and_hyphenates() {
        assert_eq!(base_slug("Dell 7480!"), "dell-7480");
        assert_eq!(base_slug("  Wool   Sweater  "), "wool-sweater");
    }

    #[test]
    fn test_base_slug_drops_non_ascii() {
        assert_eq!(base_slug("Café au Lait"), "caf-au-lait");
        assert_eq!(base_slug("Überraschung"), "berraschung");
        assert_eq!(base_slug("日本語"), "");
    }

    #[test]
    fn test_base_slug_collapses_punctuation_runs() {
        assert_eq!(base_slug("a -- b!!c"), "a-b-c");
        assert_eq!(base_slug("!!!"), "");
    }

    #[test]
    fn test_generate_appends_suffix() {
        let slug = generate("Dell 7480!");
        assert!(slug.starts_with("dell-7480-"));
        assert_eq!(slug.len(), "dell-7480-".len() + SUFFIX_LEN);
    }

    #[test]
    fn test_generate_handles_empty_base() {
        let slug = generate("###");
        assert_eq!(slug.len(), SUFFIX_LEN);
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_is_randomized() {
        let a = generate("Same Name");
        let b = generate("Same Name");
        assert_ne!(a, b);
    }
}
