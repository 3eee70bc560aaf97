use thiserror::Error;

use crate::types::Provider;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not configured: set {var}")]
    MissingCredential {
        provider: Provider,
        var: &'static str,
    },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    Status {
        provider: Provider,
        status: u16,
        message: String,
    },

    #[error("{0} returned an empty response")]
    EmptyResponse(Provider),

    #[error("failed to decode {provider} response: {message}")]
    Decode { provider: Provider, message: String },

    #[error("unknown provider '{0}': expected 'groq' or 'anthropic'")]
    UnknownProvider(String),
}

impl LlmError {
    /// True when the failure happened before anything was sent upstream
    /// because no credential was configured.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LlmError::MissingCredential { .. } | LlmError::UnknownProvider(_)
        )
    }
}
