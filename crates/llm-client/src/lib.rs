//! `llm-client` — one capability, `generate(prompt) -> raw text`, over the
//! Groq and Anthropic text-generation APIs.
//!
//! # Architecture
//!
//! ```text
//! Provider + ClientOptions
//!     │
//!     ▼
//! from_env()      ← reads the provider's credential variable once
//!     │
//!     ▼
//! Box<dyn TextGenerator>
//!     ├── GroqClient       POST {base}/chat/completions   (Bearer token)
//!     └── AnthropicClient  POST {base}/v1/messages        (x-api-key)
//! ```
//!
//! A missing credential does not fail construction; the first `generate`
//! call returns [`LlmError::MissingCredential`] without touching the network,
//! so callers that never generate (history browsing) work without a key.

pub mod anthropic;
pub mod error;
pub mod groq;
pub mod types;

use std::future::Future;
use std::pin::Pin;

pub use anthropic::AnthropicClient;
pub use error::LlmError;
pub use groq::GroqClient;
pub use types::{ClientOptions, Provider};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Boxed future returned by [`TextGenerator::generate`]; keeps the trait dyn-compatible.
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Turns a prompt into the model's raw reply text.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

/// Build the client for `provider`, reading its credential from the environment.
pub fn from_env(provider: Provider, options: &ClientOptions) -> Result<Box<dyn TextGenerator>> {
    Ok(match provider {
        Provider::Groq => Box::new(GroqClient::from_env(options)?),
        Provider::Anthropic => Box::new(AnthropicClient::from_env(options)?),
    })
}
