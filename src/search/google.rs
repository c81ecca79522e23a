//! Search-engine result page scraping.
//!
//! Fetches the HTML result page with a browser-like user agent and keeps the
//! visible snippet blocks that look like English prose.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::config::SearchConfig;
use crate::error::{AnswerError, Result};
use crate::text::{first_sentences, looks_english};

use super::SearchBackend;

/// Snippet containers on the lightweight result page.
const SNIPPET_SELECTOR: &str = "div.BNeawe.s3v9rd.AP7Wnd, div.IsZvec";
/// Shorter snippets are usually navigation or labels.
const MIN_SNIPPET_CHARS: usize = 40;

pub struct GoogleSearch {
    client: Client,
    url: String,
    user_agent: String,
    timeout: Duration,
    max_snippets: usize,
    max_sentences: usize,
}

impl GoogleSearch {
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            url: config.google_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.google_timeout_secs),
            max_snippets: config.max_snippets,
            max_sentences: config.max_sentences,
        }
    }
}

/// Distinct English snippets from a result page, in page order.
pub fn extract_snippets(html: &str, max: usize) -> Result<Vec<String>> {
    let selector = Selector::parse(SNIPPET_SELECTOR)
        .map_err(|e| AnswerError::Parse(format!("Invalid snippet selector: {}", e)))?;
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    let mut snippets = Vec::new();
    for element in document.select(&selector) {
        if snippets.len() >= max {
            break;
        }
        let text = element.text().collect::<String>();
        let text = text.trim();
        if text.chars().count() <= MIN_SNIPPET_CHARS || !looks_english(text) {
            continue;
        }
        if seen.insert(text.to_string()) {
            snippets.push(text.to_string());
        }
    }

    Ok(snippets)
}

#[async_trait]
impl SearchBackend for GoogleSearch {
    fn name(&self) -> &'static str {
        "google"
    }

    fn label(&self) -> &'static str {
        "Google"
    }

    async fn search(&self, query: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("q", query), ("hl", "en")])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnswerError::Search(format!(
                "Google returned HTTP {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let snippets = extract_snippets(&html, self.max_snippets)?;
        let answer = first_sentences(&snippets.join(" "), self.max_sentences);

        Ok(Some(answer).filter(|a| !a.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RESULT_PAGE: &str = r#"
        <html><body>
          <div class="BNeawe s3v9rd AP7Wnd">Paris is the capital and most populous city of France. It sits on the Seine.</div>
          <div class="BNeawe s3v9rd AP7Wnd">Short label</div>
          <div class="IsZvec">Paris is the capital and most populous city of France. It sits on the Seine.</div>
          <div class="IsZvec">The city is known for the Eiffel Tower! Millions visit each year. Museums abound.</div>
          <div class="IsZvec">東京は日本の首都であり、最大の都市です。東京は日本の首都であり、最大の都市です。</div>
          <div class="other">This text is in an unrelated container and should be ignored entirely.</div>
        </body></html>
    "#;

    #[test]
    fn test_extract_snippets_filters_and_dedups() {
        let snippets = extract_snippets(RESULT_PAGE, 5).unwrap();
        assert_eq!(snippets.len(), 2);
        assert!(snippets[0].starts_with("Paris is the capital"));
        assert!(snippets[1].starts_with("The city is known"));
    }

    #[test]
    fn test_extract_snippets_respects_max() {
        let snippets = extract_snippets(RESULT_PAGE, 1).unwrap();
        assert_eq!(snippets.len(), 1);
    }

    #[test]
    fn test_extract_snippets_zero_max_keeps_nothing() {
        assert!(extract_snippets(RESULT_PAGE, 0).unwrap().is_empty());
    }

    #[test]
    fn test_extract_snippets_empty_page() {
        assert!(extract_snippets("<html></html>", 5).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_keeps_first_three_sentences() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "capital of france"))
            .and(query_param("hl", "en"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULT_PAGE))
            .mount(&server)
            .await;

        let config = SearchConfig {
            google_url: format!("{}/search", server.uri()),
            ..SearchConfig::default()
        };
        let backend = GoogleSearch::new(Client::new(), &config);
        let answer = backend.search("capital of france").await.unwrap();

        assert_eq!(
            answer.as_deref(),
            Some(
                "Paris is the capital and most populous city of France. It sits on the Seine. \
                 The city is known for the Eiffel Tower!"
            )
        );
    }

    #[tokio::test]
    async fn test_search_no_snippets_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .mount(&server)
            .await;

        let config = SearchConfig {
            google_url: format!("{}/search", server.uri()),
            ..SearchConfig::default()
        };
        let backend = GoogleSearch::new(Client::new(), &config);
        assert_eq!(backend.search("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let config = SearchConfig {
            google_url: format!("{}/search", server.uri()),
            ..SearchConfig::default()
        };
        let backend = GoogleSearch::new(Client::new(), &config);
        assert!(matches!(
            backend.search("anything").await,
            Err(AnswerError::Search(_))
        ));
    }
}
