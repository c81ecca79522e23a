//! AnswerChain - question answering through a prioritized chain of providers

pub mod config;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod search;
pub mod server;
pub mod text;

pub use config::Config;
pub use error::{AnswerError, Result};
pub use pipeline::{Resolution, ResolutionPipeline};
