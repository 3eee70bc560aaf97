use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use specgen_core::error::SpecError;

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Wraps an `anyhow::Error`; when the chain holds a [`SpecError`] its kind
/// picks the status, anything else is a 500. The body is always
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(SpecError::Validation(msg.into()).into())
    }

    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<SpecError>() {
            Some(SpecError::Validation(_) | SpecError::InvalidFormat(_)) => StatusCode::BAD_REQUEST,
            Some(SpecError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(
                SpecError::Configuration(_)
                | SpecError::Upstream(_)
                | SpecError::Parse(_)
                | SpecError::Io(_)
                | SpecError::Yaml(_)
                | SpecError::Json(_),
            )
            | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
