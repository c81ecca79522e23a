//! Local question/answer corpus.
//!
//! The corpus is loaded once at startup from a JSON array of
//! `{ "question": ..., "answer": ... }` objects and is read-only afterwards.
//! It is shared between requests as an `Arc<[CorpusEntry]>`, so concurrent
//! matchers never need a lock.

pub mod matcher;
pub mod scorer;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{AnswerError, Result};

pub use matcher::{CorpusMatcher, ScoredCandidate};
pub use scorer::KeywordScorer;

/// A known question and its canned answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Question text matched against incoming queries.
    #[serde(default)]
    pub question: String,
    /// Answer returned when the question matches.
    #[serde(default)]
    pub answer: String,
}

impl CorpusEntry {
    /// Create a new entry.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Immutable, ordered collection of corpus entries.
#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Arc<[CorpusEntry]>,
}

impl Corpus {
    /// Build a corpus from entries, preserving their order.
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// A corpus with no entries. The matcher never matches against it.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load a corpus from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AnswerError::Corpus(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Parse a corpus from a JSON array.
    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: Vec<CorpusEntry> = serde_json::from_str(raw)
            .map_err(|e| AnswerError::Corpus(format!("Invalid corpus JSON: {}", e)))?;
        Ok(Self::new(entries))
    }

    /// Load a corpus, falling back to an empty one when the file is missing
    /// or malformed.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(corpus) => {
                info!(path = %path.display(), entries = corpus.len(), "Loaded corpus");
                corpus
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Could not load corpus, starting empty");
                Self::empty()
            }
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CorpusEntry> {
        self.entries.iter()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::empty()
    }
}
