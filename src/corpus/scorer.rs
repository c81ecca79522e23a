//! Keyword similarity scorer.
//!
//! Scoring algorithm:
//! - Extract stopword-filtered keyword sets of both texts (0 if either is empty)
//! - Base score = Jaccard index of the two sets
//! - If either normalized text contains the other, raise the score to at
//!   least `containment_floor` so short exact phrases still win against long
//!   corpus questions

use crate::text::{keywords, normalize};

/// Default floor applied when one text contains the other.
pub const DEFAULT_CONTAINMENT_FLOOR: f64 = 0.8;

/// Symmetric keyword-overlap similarity in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordScorer {
    containment_floor: f64,
}

impl KeywordScorer {
    /// Create a scorer with a custom containment floor (clamped to `[0, 1]`).
    pub fn new(containment_floor: f64) -> Self {
        Self {
            containment_floor: containment_floor.clamp(0.0, 1.0),
        }
    }

    /// The floor applied on substring containment.
    pub fn containment_floor(&self) -> f64 {
        self.containment_floor
    }

    /// Score two texts. Symmetric in its arguments.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let a_words = keywords(a);
        let b_words = keywords(b);
        if a_words.is_empty() || b_words.is_empty() {
            return 0.0;
        }

        let intersection = a_words.intersection(&b_words).count();
        let union = a_words.union(&b_words).count();
        let base = intersection as f64 / union as f64;

        let a_norm = normalize(a);
        let b_norm = normalize(b);
        if a_norm.contains(&b_norm) || b_norm.contains(&a_norm) {
            base.max(self.containment_floor)
        } else {
            base
        }
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINMENT_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_scores_one() {
        let scorer = KeywordScorer::default();
        assert_eq!(scorer.score("Rust programming", "Rust programming"), 1.0);
        assert_eq!(scorer.score("What is your name?", "what is your name"), 1.0);
    }

    /// Texts covering empty, stopword-only, punctuation-only, contained,
    /// overlapping, disjoint and non-ASCII inputs.
    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "?!...",
        "who is the",
        "what is the",
        "rust",
        "Rust!",
        "rust lang",
        "learn rust",
        "how do I learn rust programming",
        "capital",
        "capital of france",
        "What is the capital city of France?",
        "capital germany",
        "Is Rust a programming language?",
        "weather today",
        "stock prices today",
        "snake_case v2.0",
        "café au lait",
        "東京",
        "the the the rust rust",
        "a an and of for to from by",
    ];

    #[test]
    fn test_symmetry_and_range() {
        for scorer in [
            KeywordScorer::default(),
            KeywordScorer::new(0.0),
            KeywordScorer::new(1.0),
        ] {
            for a in SAMPLES {
                for b in SAMPLES {
                    let ab = scorer.score(a, b);
                    let ba = scorer.score(b, a);
                    assert_eq!(ab, ba, "{:?} / {:?}", a, b);
                    assert!((0.0..=1.0).contains(&ab), "{:?} / {:?} = {}", a, b, ab);
                }
            }
        }
    }

    #[test]
    fn test_self_score_is_one_with_keywords() {
        let scorer = KeywordScorer::default();
        for text in SAMPLES {
            let expected = if keywords(text).is_empty() { 0.0 } else { 1.0 };
            assert_eq!(scorer.score(text, text), expected, "{:?}", text);
        }
    }

    #[test]
    fn test_stopword_only_scores_zero() {
        let scorer = KeywordScorer::default();
        assert_eq!(scorer.score("who is the", "who is the"), 0.0);
        assert_eq!(scorer.score("", "anything"), 0.0);
    }

    #[test]
    fn test_jaccard_base() {
        let scorer = KeywordScorer::default();
        // {capital, france} vs {capital, germany}: 1 / 3
        let score = scorer.score("capital france", "capital germany");
        assert!((score - 1.0 / 3.0).abs() < 1e-9, "score = {}", score);
    }

    #[test]
    fn test_containment_override() {
        let scorer = KeywordScorer::default();
        // Jaccard is 1/4 but the query is contained in the question.
        let score = scorer.score("python", "is python easy to learn quickly");
        assert_eq!(score, 0.8);
    }

    #[test]
    fn test_containment_does_not_lower_score() {
        let scorer = KeywordScorer::new(0.1);
        assert_eq!(scorer.score("rust lang", "rust lang"), 1.0);
    }

    #[test]
    fn test_no_overlap() {
        let scorer = KeywordScorer::default();
        assert_eq!(scorer.score("weather today", "stock prices"), 0.0);
    }

    #[test]
    fn test_scores_in_unit_range() {
        let scorer = KeywordScorer::new(3.0);
        assert_eq!(scorer.containment_floor(), 1.0);
        let score = scorer.score("rust", "rust is fun");
        assert!((0.0..=1.0).contains(&score));
    }
}
