//! Encyclopedia backend.
//!
//! Two-step lookup against the MediaWiki API: a full-text search for the top
//! candidate titles, then the plain-text intro extract of each candidate in
//! ranked order. The first extract that looks like English is truncated to a
//! few sentences.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{AnswerError, Result};
use crate::text::{first_sentences, looks_english};

use super::SearchBackend;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: BTreeMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    #[serde(default)]
    extract: Option<String>,
}

pub struct WikipediaSearch {
    client: Client,
    url: String,
    timeout: Duration,
    candidates: usize,
    max_sentences: usize,
}

impl WikipediaSearch {
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            url: config.wikipedia_url.clone(),
            timeout: Duration::from_secs(config.wikipedia_timeout_secs),
            candidates: config.wikipedia_candidates.max(1),
            max_sentences: config.max_sentences,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(&self.url)
            .query(params)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnswerError::Search(format!(
                "Wikipedia returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AnswerError::Parse(format!("Unexpected Wikipedia payload: {}", e)))
    }

    /// Ranked candidate page titles for `query`.
    async fn candidate_titles(&self, query: &str) -> Result<Vec<String>> {
        let limit = self.candidates.to_string();
        let response: SearchResponse = self
            .get_json(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("utf8", ""),
                ("format", "json"),
                ("srlimit", limit.as_str()),
            ])
            .await?;

        Ok(response
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default())
    }

    /// Plain-text intro extract of one page.
    async fn intro_extract(&self, title: &str) -> Result<Option<String>> {
        let response: ExtractResponse = self
            .get_json(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("format", "json"),
                ("titles", title),
            ])
            .await?;

        Ok(response
            .query
            .and_then(|q| q.pages.into_values().next())
            .and_then(|page| page.extract))
    }
}

#[async_trait]
impl SearchBackend for WikipediaSearch {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn label(&self) -> &'static str {
        "Wikipedia"
    }

    async fn search(&self, query: &str) -> Result<Option<String>> {
        let titles = self.candidate_titles(query).await?;

        for title in titles.iter().take(self.candidates) {
            match self.intro_extract(title).await? {
                Some(extract) if looks_english(&extract) => {
                    return Ok(Some(first_sentences(&extract, self.max_sentences)));
                }
                _ => debug!(title = %title, "Skipping unusable extract"),
            }
        }

        Ok(None)
    }
}
