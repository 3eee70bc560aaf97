use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use specgen_core::types::{GenerationRequest, SpecRecord};

use crate::error::AppError;
use crate::pipeline;
use crate::state::AppState;

/// POST /api/generate-tasks — generate user stories and engineering tasks
/// for a feature description and record the result in history.
///
/// A body that is not a JSON object of strings is a 400 in the same
/// `{"error": ...}` shape as a validation failure.
pub async fn generate_tasks(
    State(app): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<SpecRecord>, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let record = pipeline::generate(&app, body).await?;
    Ok(Json(record))
}
