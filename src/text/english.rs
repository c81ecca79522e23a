//! Snippet cleanup: English heuristic and sentence truncation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence-ending punctuation followed by whitespace.
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.?!]\s+").expect("sentence break pattern is valid"));

const MIN_ASCII_LETTERS: usize = 5;
const MAX_NON_ASCII_RATIO: f64 = 0.15;

/// Cheap proxy for "is this a usable English sentence".
///
/// True iff the text has more than 5 ASCII letters and fewer than 15% of its
/// characters are non-ASCII. Not a language classifier.
pub fn looks_english(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let mut letters = 0usize;
    let mut non_ascii = 0usize;
    let mut total = 0usize;
    for ch in text.chars() {
        total += 1;
        if ch.is_ascii_alphabetic() {
            letters += 1;
        } else if !ch.is_ascii() {
            non_ascii += 1;
        }
    }

    letters > MIN_ASCII_LETTERS && (non_ascii as f64 / total as f64) < MAX_NON_ASCII_RATIO
}

/// Split text after every `.`, `?` or `!` that is followed by whitespace.
///
/// Punctuation stays with its sentence; the whitespace is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // Punctuation is a single ASCII byte.
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Keep the first `max` sentences of `text`, joined with single spaces.
pub fn first_sentences(text: &str, max: usize) -> String {
    split_sentences(text)
        .into_iter()
        .take(max)
        .collect::<Vec<_>>()
        .join(" ")
}
