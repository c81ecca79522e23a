//! Chat backend registry.
//!
//! The chat provider speaks the OpenAI-compatible chat-completion protocol.
//! This module maps backend ids from configuration to their default API base
//! URLs, so switching backends is a one-word config change.

/// Metadata describing an OpenAI-compatible chat backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatBackendSpec {
    /// Config id (e.g. "groq").
    pub name: &'static str,
    /// Default API base URL, without the `/chat/completions` suffix.
    pub default_base_url: &'static str,
}

/// Known chat backends.
pub const CHAT_BACKENDS: &[ChatBackendSpec] = &[
    ChatBackendSpec {
        name: "groq",
        default_base_url: "https://api.groq.com/openai/v1",
    },
    ChatBackendSpec {
        name: "openai",
        default_base_url: "https://api.openai.com/v1",
    },
    ChatBackendSpec {
        name: "openrouter",
        default_base_url: "https://openrouter.ai/api/v1",
    },
    ChatBackendSpec {
        name: "gemini",
        default_base_url: "https://generativelanguage.googleapis.com/v1beta/openai",
    },
    ChatBackendSpec {
        name: "vllm",
        default_base_url: "http://localhost:8000/v1",
    },
    ChatBackendSpec {
        name: "ollama",
        default_base_url: "http://localhost:11434/v1",
    },
];

/// Look up a backend by id (case-insensitive).
pub fn resolve_chat_backend(name: &str) -> Option<&'static ChatBackendSpec> {
    let name = name.trim();
    CHAT_BACKENDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Effective API base: a non-empty override wins over the registry default.
///
/// Returns `None` for an unknown backend without an override.
pub fn resolve_api_base(backend: &str, api_base: Option<&str>) -> Option<String> {
    let user_base = api_base
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .map(|base| base.trim_end_matches('/').to_string());

    user_base.or_else(|| resolve_chat_backend(backend).map(|spec| spec.default_base_url.to_string()))
}
