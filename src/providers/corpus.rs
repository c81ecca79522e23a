//! Corpus lookup as a pipeline stage.

use async_trait::async_trait;

use crate::corpus::CorpusMatcher;

use super::AnswerProvider;

/// Answers from the local question/answer corpus.
pub struct CorpusProvider {
    matcher: CorpusMatcher,
}

impl CorpusProvider {
    pub fn new(matcher: CorpusMatcher) -> Self {
        Self { matcher }
    }
}

#[async_trait]
impl AnswerProvider for CorpusProvider {
    fn name(&self) -> &'static str {
        "corpus"
    }

    async fn answer(&self, query: &str) -> Option<String> {
        self.matcher.find_answer(query)
    }
}
