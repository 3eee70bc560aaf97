//! Groq-hosted OpenAI-compatible chat completions.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::{upstream_message, ClientOptions, Provider};
use crate::{GenerateFuture, Result, TextGenerator};

const SYSTEM_PROMPT: &str = "You return only valid JSON.";

pub struct GroqClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    base_url: String,
}

impl GroqClient {
    /// Build a client. A `None` key is allowed here; `generate` reports it.
    pub fn new(api_key: Option<String>, options: &ClientOptions) -> Result<Self> {
        Ok(Self {
            http: options.http_client(Provider::Groq)?,
            api_key,
            model: options.model_for(Provider::Groq),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            base_url: options.base_url_for(Provider::Groq),
        })
    }

    pub fn from_env(options: &ClientOptions) -> Result<Self> {
        Self::new(Provider::Groq.credential_from_env(), options)
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingCredential {
                provider: Provider::Groq,
                var: Provider::Groq.credential_vars()[0],
            })?;

        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %self.model, %url, "sending groq chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::Transport {
                provider: Provider::Groq,
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| LlmError::Transport {
                provider: Provider::Groq,
                source,
            })?;

        if !status.is_success() {
            return Err(LlmError::Status {
                provider: Provider::Groq,
                status: status.as_u16(),
                message: upstream_message(&text, "Groq request failed"),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| LlmError::Decode {
            provider: Provider::Groq,
            message: e.to_string(),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyResponse(Provider::Groq))
    }
}

impl TextGenerator for GroqClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.complete(prompt))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
