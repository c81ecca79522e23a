//! Instant-answer API backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::{AnswerError, Result};
use crate::text::looks_english;

use super::SearchBackend;

#[derive(Debug, Default, Deserialize)]
pub struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    pub abstract_text: Option<String>,
    #[serde(rename = "RelatedTopics", default)]
    pub related_topics: Vec<RelatedTopic>,
}

/// Related topic entry. Topic groups carry no `Text` and are skipped.
#[derive(Debug, Default, Deserialize)]
pub struct RelatedTopic {
    #[serde(rename = "Text", default)]
    pub text: Option<String>,
}

impl InstantAnswer {
    /// Abstract text if usable, else the first related topic's text.
    pub fn best_text(&self) -> Option<&str> {
        if let Some(text) = self.abstract_text.as_deref() {
            if looks_english(text) {
                return Some(text);
            }
        }

        self.related_topics
            .first()
            .and_then(|topic| topic.text.as_deref())
            .filter(|text| looks_english(text))
    }
}

pub struct DuckDuckGoSearch {
    client: Client,
    url: String,
    timeout: Duration,
}

impl DuckDuckGoSearch {
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            url: config.duckduckgo_url.clone(),
            timeout: Duration::from_secs(config.duckduckgo_timeout_secs),
        }
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoSearch {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn label(&self) -> &'static str {
        "DuckDuckGo"
    }

    async fn search(&self, query: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnswerError::Search(format!(
                "DuckDuckGo returned HTTP {}",
                response.status()
            )));
        }

        // Served as application/x-javascript, so decode the body ourselves.
        let body = response.text().await?;
        let payload: InstantAnswer = serde_json::from_str(&body)
            .map_err(|e| AnswerError::Parse(format!("Unexpected DuckDuckGo payload: {}", e)))?;

        Ok(payload.best_text().map(str::to_string))
    }
}
