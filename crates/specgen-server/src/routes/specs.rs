use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use specgen_core::export::{self, ExportFormat};
use specgen_core::types::{SpecRecord, SpecSummary};

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/specs — newest-first summaries of recent generations.
pub async fn list_specs(State(app): State<AppState>) -> Result<Json<Vec<SpecSummary>>, AppError> {
    let store = app.store.clone();
    let list = tokio::task::spawn_blocking(move || store.summaries())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;
    Ok(Json(list))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/specs/:id — full record including tasks.
pub async fn get_spec(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SpecRecord>, AppError> {
    Ok(Json(find(&app, id).await?))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[derive(Debug, Default, serde::Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// GET /api/specs/:id/export?format=markdown|text — downloadable document.
pub async fn export_spec(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let format = match query.format.as_deref() {
        Some(f) => f.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };
    let record = find(&app, id).await?;
    let body = export::render(&record, format);
    let disposition = format!(
        "attachment; filename=\"tasks-{}.{}\"",
        record.id,
        format.extension()
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find(app: &AppState, id: String) -> Result<SpecRecord, AppError> {
    let store = app.store.clone();
    let record = tokio::task::spawn_blocking(move || store.find(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use specgen_core::config::Config;
    use specgen_core::types::{GenerationRequest, Task, TaskSet};

    fn app(dir: &tempfile::TempDir) -> AppState {
        AppState::from_config(dir.path().to_path_buf(), Config::default()).unwrap()
    }

    fn seed(app: &AppState, id: &str) {
        let rec = SpecRecord::from_request(
            id.to_string(),
            Utc::now(),
            &GenerationRequest::new("Build a todo app", "Students", "Simple UI"),
            TaskSet {
                user_stories: vec![Task::new("Add", "Add a task")],
                engineering_tasks: vec![Task::new("DB", "Schema")],
            },
        );
        app.store.insert(rec).unwrap();
    }

    #[tokio::test]
    async fn list_empty_initially() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = list_specs(State(app(&dir))).await.unwrap();
        assert!(result.0.is_empty());
    }

    #[tokio::test]
    async fn get_missing_returns_404() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = get_spec(State(app(&dir)), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn get_returns_tasks() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = app(&dir);
        seed(&app, "100");
        let rec = get_spec(State(app), Path("100".to_string())).await.unwrap();
        assert_eq!(rec.0.tasks.engineering_tasks[0].title, "DB");
    }

    #[tokio::test]
    async fn export_rejects_unknown_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = app(&dir);
        seed(&app, "100");
        let err = export_spec(
            State(app),
            Path("100".to_string()),
            Query(ExportQuery {
                format: Some("pdf".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_defaults_to_markdown() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = app(&dir);
        seed(&app, "100");
        let resp = export_spec(State(app), Path("100".to_string()), Query(ExportQuery::default()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/markdown; charset=utf-8"
        );
        assert!(resp.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("tasks-100.md"));
    }
}
