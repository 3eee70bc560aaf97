use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::LlmError;

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Upstream text-generation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Groq-hosted OpenAI-compatible chat completions (bearer token).
    #[default]
    Groq,
    /// Anthropic messages API (`x-api-key` header).
    Anthropic,
}

impl Provider {
    /// Environment variables consulted for the credential, in priority order.
    pub fn credential_vars(self) -> &'static [&'static str] {
        match self {
            Provider::Groq => &["GROQ_API_KEY"],
            Provider::Anthropic => &["CLAUDE_API_KEY", "ANTHROPIC_API_KEY"],
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Groq => "llama-3.3-70b-versatile",
            Provider::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Read the first non-empty credential variable from the process environment.
    pub fn credential_from_env(self) -> Option<String> {
        self.credential_vars()
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.trim().is_empty())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Groq => write!(f, "Groq"),
            Provider::Anthropic => write!(f, "Anthropic"),
        }
    }
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(Provider::Groq),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            other => Err(LlmError::UnknownProvider(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientOptions
// ---------------------------------------------------------------------------

/// Per-client tuning. `None` fields fall back to the provider defaults.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.2,
            max_tokens: 2048,
            base_url: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl ClientOptions {
    pub(crate) fn model_for(&self, provider: Provider) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string())
    }

    pub(crate) fn base_url_for(&self, provider: Provider) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(provider.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    pub(crate) fn http_client(&self, provider: Provider) -> Result<reqwest::Client, LlmError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|source| LlmError::Transport { provider, source })
    }
}

/// Shape shared by both providers' error bodies: `{"error": {"message": "..."}}`.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

/// Pull `error.message` out of an upstream error body, falling back to `fallback`.
pub(crate) fn upstream_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("GROQ".parse::<Provider>().unwrap(), Provider::Groq);
        assert_eq!(" anthropic ".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!("claude".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert!("openai".parse::<Provider>().is_err());
    }

    #[test]
    fn options_fall_back_to_provider_defaults() {
        let opts = ClientOptions::default();
        assert_eq!(opts.model_for(Provider::Groq), "llama-3.3-70b-versatile");
        assert_eq!(
            opts.base_url_for(Provider::Anthropic),
            "https://api.anthropic.com"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let opts = ClientOptions {
            base_url: Some("http://127.0.0.1:9999/".into()),
            ..Default::default()
        };
        assert_eq!(opts.base_url_for(Provider::Groq), "http://127.0.0.1:9999");
    }

    #[test]
    fn upstream_message_prefers_error_body() {
        let body = r#"{"error":{"message":"rate limited","type":"rate_limit"}}"#;
        assert_eq!(upstream_message(body, "fallback"), "rate limited");
        assert_eq!(upstream_message("<html>", "fallback"), "fallback");
        assert_eq!(upstream_message(r#"{"error":{}}"#, "fallback"), "fallback");
    }
}
