//! Text canonicalization shared by the matcher and the search aggregator.
//!
//! - [`normalize`]: lowercase, ASCII word characters only, single spaces.
//! - [`keywords`]: stopword-filtered token set of the normalized text.
//! - [`looks_english`] / [`first_sentences`]: cleanup helpers for external
//!   snippets (see `english.rs`).

mod english;

use std::collections::HashSet;

use once_cell::sync::Lazy;

pub use english::{first_sentences, looks_english, split_sentences};

/// English function words and conversational fillers ignored by keyword
/// extraction.
pub const STOPWORDS: &[&str] = &[
    "the", "is", "in", "at", "which", "on", "a", "an", "and", "of", "for", "to", "from", "by",
    "what", "who", "when", "where", "why", "how", "about", "tell", "me",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Canonicalize text for comparison.
///
/// Lowercases, replaces every character that is not an ASCII letter, digit or
/// underscore with a space, collapses whitespace runs and trims. Total: empty
/// input yields an empty string.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the keyword set of `text`: normalized tokens minus stopwords.
pub fn keywords(text: &str) -> HashSet<String> {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty() && !STOPWORD_SET.contains(*token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  What IS your   name?! "), "what is your name");
    }

    #[test]
    fn test_normalize_keeps_underscore_and_digits() {
        assert_eq!(normalize("snake_case v2.0"), "snake_case v2 0");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn test_normalize_non_ascii_letters_become_separators() {
        assert_eq!(normalize("café au lait"), "caf au lait");
    }

    #[test]
    fn test_keywords_drop_stopwords() {
        let kw = keywords("Tell me about the Eiffel Tower");
        let expected: HashSet<String> = ["eiffel", "tower"].iter().map(|s| s.to_string()).collect();
        assert_eq!(kw, expected);
    }

    #[test]
    fn test_keywords_all_stopwords_is_empty() {
        assert!(keywords("who is the").is_empty());
        assert!(keywords("").is_empty());
    }

    #[test]
    fn test_keywords_deduplicates() {
        let kw = keywords("rust rust RUST");
        assert_eq!(kw.len(), 1);
        assert!(kw.contains("rust"));
    }
}
