//! Configuration for AnswerChain
//!
//! Configuration is read from an optional JSON file and then overridden by
//! environment variables. Every section uses `#[serde(default)]`, so a partial
//! file (or none at all) yields a working setup.
//!
//! File location: `$ANSWERCHAIN_CONFIG`, else
//! `<config_dir>/answerchain/config.json`.
//!
//! ```json
//! {
//!     "server": { "port": 8080, "cors_origins": ["https://example.app"] },
//!     "matcher": { "threshold": 0.6 },
//!     "chat": { "provider": "groq", "model": "llama-3.3-70b-versatile" }
//! }
//! ```

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::corpus::matcher::DEFAULT_MATCH_THRESHOLD;
use crate::corpus::scorer::DEFAULT_CONTAINMENT_FLOOR;
use crate::error::{AnswerError, Result};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ANSWERCHAIN_CONFIG";

const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

// ============================================================================
// Sections
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub corpus: CorpusConfig,
    pub matcher: MatcherConfig,
    pub chat: ChatConfig,
    pub search: SearchConfig,
}

/// HTTP listener and CORS settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5000".to_string(),
            ],
        }
    }
}

/// Location of the question/answer corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data.json"),
        }
    }
}

/// Corpus matching parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum score for a corpus answer to be returned.
    pub threshold: f64,
    /// Score floor when one text contains the other.
    pub containment_floor: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            containment_floor: DEFAULT_CONTAINMENT_FLOOR,
        }
    }
}

/// Chat-completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Backend id from the chat registry (e.g. "groq", "openai").
    pub provider: String,
    /// Bearer credential. The provider is disabled when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Overrides the registry's default base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub model: String,
    pub system_prompt: String,
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            api_key: None,
            api_base: None,
            model: DEFAULT_CHAT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout_secs: 20,
        }
    }
}

/// Web search backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub google_url: String,
    pub duckduckgo_url: String,
    pub wikipedia_url: String,
    pub google_timeout_secs: u64,
    pub duckduckgo_timeout_secs: u64,
    pub wikipedia_timeout_secs: u64,
    /// Browser-like identity sent to the search engine.
    pub user_agent: String,
    /// Candidate page titles requested from the encyclopedia.
    pub wikipedia_candidates: usize,
    /// Snippets kept from the search-engine result page.
    pub max_snippets: usize,
    /// Sentences kept in a search answer.
    pub max_sentences: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            google_url: "https://www.google.com/search".to_string(),
            duckduckgo_url: "https://api.duckduckgo.com/".to_string(),
            wikipedia_url: "https://en.wikipedia.org/w/api.php".to_string(),
            google_timeout_secs: 12,
            duckduckgo_timeout_secs: 10,
            wikipedia_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            wikipedia_candidates: 2,
            max_snippets: 5,
            max_sentences: 3,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Default config file path.
    pub fn path() -> PathBuf {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            if !explicit.trim().is_empty() {
                return PathBuf::from(explicit);
            }
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("answerchain")
            .join("config.json")
    }

    /// Load config from the default path plus environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file(&Self::path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file. A missing file yields defaults.
    pub fn load_file(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            AnswerError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// `PORT`, `GROQ_API_KEY` and `GROQ_MODEL` keep the names used by existing
    /// deployments; the rest are `ANSWERCHAIN_*`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid PORT"),
            }
        }
        if let Some(host) = get("ANSWERCHAIN_HOST") {
            self.server.host = host;
        }
        if let Some(origins) = get("ANSWERCHAIN_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(path) = get("ANSWERCHAIN_CORPUS_PATH") {
            self.corpus.path = PathBuf::from(path);
        }
        if let Some(threshold) = get("ANSWERCHAIN_MATCH_THRESHOLD") {
            match threshold.trim().parse() {
                Ok(threshold) => self.matcher.threshold = threshold,
                Err(_) => warn!(value = %threshold, "Ignoring invalid ANSWERCHAIN_MATCH_THRESHOLD"),
            }
        }
        if let Some(provider) = get("ANSWERCHAIN_CHAT_PROVIDER") {
            self.chat.provider = provider;
        }
        if let Some(base) = get("ANSWERCHAIN_CHAT_API_BASE") {
            self.chat.api_base = Some(base);
        }
        if let Some(key) = get("GROQ_API_KEY") {
            self.chat.api_key = Some(key);
        }
        if let Some(model) = get("GROQ_MODEL") {
            self.chat.model = model;
        }
    }
}
