//! Web search fallbacks.
//!
//! The [`WebSearchAggregator`] asks three backends strictly one after another
//! and returns the first usable answer, labelled with its source:
//!
//! 1. [`GoogleSearch`]: result-page snippets (`From Google: ...`)
//! 2. [`DuckDuckGoSearch`]: instant-answer API (`From DuckDuckGo: ...`)
//! 3. [`WikipediaSearch`]: encyclopedia intro extracts (`From Wikipedia: ...`)
//!
//! Each backend is isolated: an error from one is logged and the next backend
//! is tried. There are no retries.

pub mod duckduckgo;
pub mod google;
pub mod wikipedia;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::error::Result;
use crate::providers::AnswerProvider;

pub use duckduckgo::DuckDuckGoSearch;
pub use google::GoogleSearch;
pub use wikipedia::WikipediaSearch;

/// A single web search backend.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Stable backend id for logs.
    fn name(&self) -> &'static str;

    /// Human-readable source label used in the answer prefix.
    fn label(&self) -> &'static str;

    /// Cleaned answer text, `Ok(None)` when nothing usable was found.
    async fn search(&self, query: &str) -> Result<Option<String>>;
}

/// Final reply when no provider produced an answer.
pub fn apology(query: &str) -> String {
    format!("I couldn't find a clear English answer for \"{}\".", query)
}

/// Build the shared HTTP client for search backends.
pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(5))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Tries search backends in order, returning the first usable answer.
pub struct WebSearchAggregator {
    backends: Vec<Box<dyn SearchBackend>>,
}

impl WebSearchAggregator {
    /// Aggregator over an explicit, ordered backend list.
    pub fn new(backends: Vec<Box<dyn SearchBackend>>) -> Self {
        Self { backends }
    }

    /// Google, then DuckDuckGo, then Wikipedia.
    pub fn from_config(config: &SearchConfig) -> Self {
        let client = build_client();
        Self::new(vec![
            Box::new(GoogleSearch::new(client.clone(), config)),
            Box::new(DuckDuckGoSearch::new(client.clone(), config)),
            Box::new(WikipediaSearch::new(client, config)),
        ])
    }

    /// Backend ids in priority order.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// First labelled answer, or `None` when every backend fails.
    pub async fn first_answer(&self, query: &str) -> Option<String> {
        for backend in &self.backends {
            info!(backend = backend.name(), "Searching");
            match backend.search(query).await {
                Ok(Some(text)) if !text.trim().is_empty() => {
                    return Some(format!("From {}: {}", backend.label(), text.trim()));
                }
                Ok(_) => {
                    debug!(backend = backend.name(), "No usable result");
                }
                Err(e) => {
                    warn!(backend = backend.name(), error = %e, "Search backend failed");
                }
            }
        }
        None
    }

    /// Labelled answer, or the apology sentence. Never empty.
    pub async fn search(&self, query: &str) -> String {
        match self.first_answer(query).await {
            Some(answer) => answer,
            None => apology(query),
        }
    }
}

#[async_trait]
impl AnswerProvider for WebSearchAggregator {
    fn name(&self) -> &'static str {
        "web_search"
    }

    async fn answer(&self, query: &str) -> Option<String> {
        self.first_answer(query).await
    }
}
