use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Upstream(String),

    #[error("failed to parse AI response: {0}")]
    Parse(String),

    #[error("specification not found: {0}")]
    NotFound(String),

    #[error("invalid export format '{0}': expected 'markdown' or 'text'")]
    InvalidFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<llm_client::LlmError> for SpecError {
    fn from(e: llm_client::LlmError) -> Self {
        if e.is_configuration() {
            SpecError::Configuration(e.to_string())
        } else {
            SpecError::Upstream(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use llm_client::{LlmError, Provider};

    #[test]
    fn missing_credential_becomes_configuration_error() {
        let err: SpecError = LlmError::MissingCredential {
            provider: Provider::Groq,
            var: "GROQ_API_KEY",
        }
        .into();
        assert!(matches!(err, SpecError::Configuration(_)));
    }

    #[test]
    fn status_error_becomes_upstream_with_message() {
        let err: SpecError = LlmError::Status {
            provider: Provider::Anthropic,
            status: 529,
            message: "Overloaded".into(),
        }
        .into();
        match err {
            SpecError::Upstream(msg) => assert_eq!(msg, "Overloaded"),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
