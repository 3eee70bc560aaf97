pub mod generate;
pub mod health;
pub mod specs;

use axum::http::StatusCode;
use axum::Json;

/// Fallback for unknown paths: a JSON 404 in the same shape as `AppError`.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}
