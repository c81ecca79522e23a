//! Best-match lookup over the corpus.

use tracing::info;

use super::scorer::KeywordScorer;
use super::{Corpus, CorpusEntry};

/// Default minimum score for a corpus answer to be returned.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.55;

/// A corpus entry paired with its score for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub entry: &'a CorpusEntry,
    pub score: f64,
}

/// Scores queries against every corpus question and returns the best answer
/// above a fixed threshold.
///
/// Each call is a fresh O(n) scan; nothing is cached between queries.
#[derive(Debug, Clone)]
pub struct CorpusMatcher {
    corpus: Corpus,
    scorer: KeywordScorer,
    threshold: f64,
}

impl CorpusMatcher {
    /// Create a matcher with the default threshold and scorer.
    pub fn new(corpus: Corpus) -> Self {
        Self::with_params(corpus, KeywordScorer::default(), DEFAULT_MATCH_THRESHOLD)
    }

    /// Create a matcher with a custom scorer and threshold.
    pub fn with_params(corpus: Corpus, scorer: KeywordScorer, threshold: f64) -> Self {
        Self {
            corpus,
            scorer,
            threshold,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Highest-scoring entry for `query`, regardless of threshold.
    ///
    /// Uses strict greater-than, so the earliest entry wins ties and entries
    /// scoring zero are never candidates.
    pub fn best_candidate(&self, query: &str) -> Option<ScoredCandidate<'_>> {
        let mut best: Option<ScoredCandidate<'_>> = None;
        let mut best_score = 0.0;

        for entry in self.corpus.iter() {
            let score = self.scorer.score(query, &entry.question);
            if score > best_score {
                best_score = score;
                best = Some(ScoredCandidate { entry, score });
            }
        }

        best
    }

    /// Answer of the best entry if it clears the threshold.
    pub fn find_answer(&self, query: &str) -> Option<String> {
        match self.best_candidate(query) {
            Some(candidate) if candidate.score >= self.threshold => {
                info!(
                    score = format_args!("{:.2}", candidate.score),
                    question = %candidate.entry.question,
                    "Corpus match"
                );
                Some(candidate.entry.answer.clone())
            }
            other => {
                let best_score = other.map(|c| c.score).unwrap_or(0.0);
                info!(
                    best_score = format_args!("{:.2}", best_score),
                    "No corpus match"
                );
                None
            }
        }
    }
}
