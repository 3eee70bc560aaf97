//! Anthropic messages API.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::{upstream_message, ClientOptions, Provider};
use crate::{GenerateFuture, Result, TextGenerator};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    base_url: String,
}

impl AnthropicClient {
    /// Build a client. A `None` key is allowed here; `generate` reports it.
    pub fn new(api_key: Option<String>, options: &ClientOptions) -> Result<Self> {
        Ok(Self {
            http: options.http_client(Provider::Anthropic)?,
            api_key,
            model: options.model_for(Provider::Anthropic),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            base_url: options.base_url_for(Provider::Anthropic),
        })
    }

    pub fn from_env(options: &ClientOptions) -> Result<Self> {
        Self::new(Provider::Anthropic.credential_from_env(), options)
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingCredential {
                provider: Provider::Anthropic,
                var: Provider::Anthropic.credential_vars()[0],
            })?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let url = format!("{}/v1/messages", self.base_url);
        tracing::debug!(model = %self.model, %url, "sending anthropic message");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::Transport {
                provider: Provider::Anthropic,
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| LlmError::Transport {
                provider: Provider::Anthropic,
                source,
            })?;

        if !status.is_success() {
            return Err(LlmError::Status {
                provider: Provider::Anthropic,
                status: status.as_u16(),
                message: upstream_message(&text, "Anthropic request failed"),
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode {
                provider: Provider::Anthropic,
                message: e.to_string(),
            })?;

        let joined: String = parsed
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect();

        if joined.trim().is_empty() {
            return Err(LlmError::EmptyResponse(Provider::Anthropic));
        }
        Ok(joined)
    }
}

impl TextGenerator for AnthropicClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.complete(prompt))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// Only `text` blocks carry output; other block types deserialize with `text: None`.
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
