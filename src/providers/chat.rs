//! Chat-completion provider.
//!
//! Sends the raw query to an OpenAI-compatible `/chat/completions` endpoint
//! with a fixed system instruction and returns the first completion's text.
//! A missing API key disables the provider without any network traffic.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::ChatConfig;
use crate::error::{AnswerError, Result};

use super::registry::resolve_api_base;
use super::AnswerProvider;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Generative answer provider backed by a chat-completion API.
pub struct ChatProvider {
    client: Client,
    backend: String,
    api_key: Option<String>,
    api_base: Option<String>,
    model: String,
    system_prompt: String,
    timeout: Duration,
}

impl ChatProvider {
    /// Build a provider from configuration.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self {
            client: Client::new(),
            backend: config.provider.clone(),
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            api_base: resolve_api_base(&config.provider, config.api_base.as_deref()),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Whether the provider has what it needs to make a request.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.api_base.is_some()
    }

    async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AnswerError::Config(format!("Missing API key for chat backend '{}'", self.backend))
        })?;
        let api_base = self.api_base.as_deref().ok_or_else(|| {
            AnswerError::Config(format!("Unknown chat backend '{}'", self.backend))
        })?;

        info!(backend = %self.backend, model = %self.model, "Asking chat backend");

        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", api_base))
            .bearer_auth(api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            let detail = detail.trim();
            return Err(AnswerError::Provider(if detail.is_empty() {
                format!("Chat API error: {}", status)
            } else {
                format!("Chat API error: {} ({})", status, detail)
            }));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AnswerError::Parse(format!("Failed to parse chat response: {}", e)))?;

        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty());

        if text.is_none() {
            debug!(backend = %self.backend, "Chat backend returned no text");
        }
        Ok(text)
    }
}

#[async_trait]
impl AnswerProvider for ChatProvider {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn answer(&self, query: &str) -> Option<String> {
        match self.complete(query).await {
            Ok(text) => text,
            Err(AnswerError::Config(msg)) => {
                error!(provider = self.name(), error = %msg, "Chat provider not configured");
                None
            }
            Err(e) => {
                warn!(provider = self.name(), error = %e, "Chat provider failed");
                None
            }
        }
    }
}
