//! Resolution pipeline.
//!
//! An ordered chain of [`AnswerProvider`]s tried strictly in sequence; the
//! first non-empty answer wins and later providers are never invoked. If every
//! provider comes back empty the pipeline answers with the apology sentence,
//! so [`ResolutionPipeline::resolve`] always produces text.
//!
//! Default order: cheap local checks first, paid and slow network calls last.
//!
//! ```text
//! personality -> corpus -> chat -> web_search -> apology
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::corpus::{Corpus, CorpusMatcher, KeywordScorer};
use crate::error::Result;
use crate::providers::{AnswerProvider, ChatProvider, CorpusProvider, PersonalityResponder};
use crate::search::{apology, WebSearchAggregator};

/// Source recorded when no provider answered.
pub const FALLBACK_SOURCE: &str = "fallback";

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Text returned to the caller.
    pub answer: String,
    /// Name of the provider that answered, or [`FALLBACK_SOURCE`].
    pub source: &'static str,
}

/// Strategy chain over answer providers.
pub struct ResolutionPipeline {
    providers: Vec<Arc<dyn AnswerProvider>>,
}

impl ResolutionPipeline {
    /// Pipeline over an explicit provider order.
    pub fn new(providers: Vec<Arc<dyn AnswerProvider>>) -> Self {
        Self { providers }
    }

    /// Standard chain built from configuration and a loaded corpus.
    pub fn from_config(config: &Config, corpus: Corpus) -> Result<Self> {
        let matcher = CorpusMatcher::with_params(
            corpus,
            KeywordScorer::new(config.matcher.containment_floor),
            config.matcher.threshold,
        );

        Ok(Self::new(vec![
            Arc::new(PersonalityResponder::builtin()?),
            Arc::new(CorpusProvider::new(matcher)),
            Arc::new(ChatProvider::from_config(&config.chat)),
            Arc::new(WebSearchAggregator::from_config(&config.search)),
        ]))
    }

    /// Provider names in the order they are tried.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve `query` to an answer. Total: never returns empty text for a
    /// non-empty query.
    pub async fn resolve(&self, query: &str) -> Resolution {
        for provider in &self.providers {
            debug!(stage = provider.name(), "Trying provider");
            if let Some(answer) = provider.answer(query).await {
                if answer.trim().is_empty() {
                    continue;
                }
                let source = provider.name();
                info!(source, "Resolved");
                return Resolution { answer, source };
            }
        }

        info!(source = FALLBACK_SOURCE, "Resolved");
        Resolution {
            answer: apology(query),
            source: FALLBACK_SOURCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChatConfig, SearchConfig};
    use crate::corpus::CorpusEntry;
    use crate::providers::MockAnswerProvider;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn answering(name: &'static str, answer: &'static str) -> MockAnswerProvider {
        let mut mock = MockAnswerProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_answer()
            .times(1)
            .returning(move |_| Some(answer.to_string()));
        mock
    }

    fn silent(name: &'static str) -> MockAnswerProvider {
        let mut mock = MockAnswerProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_answer().times(1).returning(|_| None);
        mock
    }

    fn never_called() -> MockAnswerProvider {
        let mut mock = MockAnswerProvider::new();
        mock.expect_name().never();
        mock.expect_answer().never();
        mock
    }

    #[tokio::test]
    async fn test_first_answer_short_circuits() {
        let pipeline = ResolutionPipeline::new(vec![
            Arc::new(silent("one")),
            Arc::new(answering("two", "from two")),
            Arc::new(never_called()),
        ]);

        let resolution = pipeline.resolve("q").await;
        assert_eq!(resolution.answer, "from two");
        assert_eq!(resolution.source, "two");
    }

    #[tokio::test]
    async fn test_blank_answer_is_skipped() {
        let pipeline = ResolutionPipeline::new(vec![
            Arc::new(answering("blank", "  ")),
            Arc::new(answering("real", "real answer")),
        ]);
        assert_eq!(pipeline.resolve("q").await.answer, "real answer");
    }

    #[tokio::test]
    async fn test_all_silent_falls_back_to_apology() {
        let pipeline = ResolutionPipeline::new(vec![Arc::new(silent("a")), Arc::new(silent("b"))]);

        let resolution = pipeline.resolve("how deep is the ocean").await;
        assert_eq!(resolution.source, FALLBACK_SOURCE);
        assert_eq!(
            resolution.answer,
            "I couldn't find a clear English answer for \"how deep is the ocean\"."
        );
    }

    #[tokio::test]
    async fn test_empty_chain_is_total() {
        let pipeline = ResolutionPipeline::new(Vec::new());
        assert!(!pipeline.resolve("anything").await.answer.is_empty());
    }

    #[tokio::test]
    async fn test_personality_bypasses_later_stages() {
        let pipeline = ResolutionPipeline::new(vec![
            Arc::new(PersonalityResponder::builtin().unwrap()),
            Arc::new(never_called()),
            Arc::new(never_called()),
        ]);

        let resolution = pipeline.resolve("who created you").await;
        assert_eq!(resolution.source, "personality");
        assert!(resolution.answer.starts_with("My creator is"));
    }

    /// Search config whose backends all fail against `server`.
    fn failing_search(server: &MockServer) -> SearchConfig {
        SearchConfig {
            google_url: format!("{}/search", server.uri()),
            duckduckgo_url: format!("{}/ddg", server.uri()),
            wikipedia_url: format!("{}/w/api.php", server.uri()),
            ..SearchConfig::default()
        }
    }

    #[tokio::test]
    async fn test_standard_chain_corpus_match() {
        let mut config = Config::default();
        config.chat.api_key = None;
        let corpus = Corpus::new(vec![CorpusEntry::new("What is your name?", "I am ChatBot.")]);
        let pipeline = ResolutionPipeline::from_config(&config, corpus).unwrap();

        assert_eq!(
            pipeline.stage_names(),
            vec!["personality", "corpus", "chat", "web_search"]
        );
        let resolution = pipeline.resolve("what is your name").await;
        assert_eq!(resolution.answer, "I am ChatBot.");
        assert_eq!(resolution.source, "corpus");
    }

    #[tokio::test]
    async fn test_standard_chain_uses_chat_when_corpus_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "42"}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let config = Config {
            chat: ChatConfig {
                api_key: Some("gsk-test".to_string()),
                api_base: Some(format!("{}/v1", server.uri())),
                ..ChatConfig::default()
            },
            search: failing_search(&server),
            ..Config::default()
        };
        let pipeline = ResolutionPipeline::from_config(&config, Corpus::empty()).unwrap();

        let resolution = pipeline.resolve("anything").await;
        assert_eq!(resolution.answer, "42");
        assert_eq!(resolution.source, "chat");
    }

    #[tokio::test]
    async fn test_standard_chain_google_after_chat_unconfigured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="IsZvec">The Pacific Ocean is the deepest ocean on Earth. Its trench is deep.</div>"#,
            ))
            .mount(&server)
            .await;

        let config = Config {
            search: failing_search(&server),
            ..Config::default()
        };
        let pipeline = ResolutionPipeline::from_config(&config, Corpus::empty()).unwrap();

        let resolution = pipeline.resolve("deepest ocean").await;
        assert_eq!(resolution.source, "web_search");
        assert_eq!(
            resolution.answer,
            "From Google: The Pacific Ocean is the deepest ocean on Earth. Its trench is deep."
        );
    }

    #[tokio::test]
    async fn test_standard_chain_everything_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = Config {
            search: failing_search(&server),
            ..Config::default()
        };
        let pipeline = ResolutionPipeline::from_config(&config, Corpus::empty()).unwrap();

        let resolution = pipeline.resolve("what is zorblax").await;
        assert_eq!(
            resolution.answer,
            "I couldn't find a clear English answer for \"what is zorblax\"."
        );
    }
}
