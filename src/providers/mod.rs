//! Answer providers for AnswerChain
//!
//! Every stage of the resolution pipeline is an [`AnswerProvider`]: a named
//! component that either produces an answer for a query or explicitly has
//! none. Failures (missing credentials, transport errors, unexpected payloads)
//! are logged and reported as `None` inside the provider, so callers never
//! deal with errors.
//!
//! Built-in providers, in pipeline order:
//! - [`PersonalityResponder`]: fixed small-talk replies
//! - [`CorpusProvider`]: local question/answer corpus
//! - [`ChatProvider`]: OpenAI-compatible chat-completion API
//! - `WebSearchAggregator` (in `crate::search`): web search fallbacks

pub mod chat;
pub mod corpus;
pub mod personality;
pub mod registry;

use async_trait::async_trait;

pub use chat::ChatProvider;
pub use corpus::CorpusProvider;
pub use personality::{PersonalityResponder, PersonalityRule};
pub use registry::{resolve_api_base, resolve_chat_backend, ChatBackendSpec, CHAT_BACKENDS};

/// A source of answers with a `(query) -> answer | none` contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Stable provider id, used in logs and as the resolution source.
    fn name(&self) -> &'static str;

    /// Answer `query`, or `None` when this provider has nothing usable.
    async fn answer(&self, query: &str) -> Option<String>;
}
