//! Task generation: validate → prompt → upstream → extract → record.

use chrono::Utc;
use specgen_core::types::{GenerationRequest, SpecRecord};
use specgen_core::{extract, prompt, SpecError};

use crate::state::AppState;

/// Run one generation and append it to history.
///
/// Nothing is sent upstream for an invalid request, and nothing is written
/// unless the reply parses. A failed history write is logged and the record
/// is still returned.
pub async fn generate(app: &AppState, request: GenerationRequest) -> anyhow::Result<SpecRecord> {
    request.validate()?;

    let prompt = prompt::build_prompt(&request);
    tracing::info!(
        provider = %app.config.provider,
        model = %app.config.effective_model(),
        goal = %request.goal,
        "generating tasks"
    );

    let raw = app.generator.generate(&prompt).await.map_err(|e| {
        tracing::warn!(error = %e, "upstream generation failed");
        SpecError::from(e)
    })?;

    let tasks = extract::parse_task_set(&raw).map_err(|e| {
        tracing::warn!(error = %e, reply = %raw, "could not parse model reply");
        e
    })?;

    let _guard = app.history_lock.lock().await;
    let store = app.store.clone();
    let record = tokio::task::spawn_blocking(move || {
        let now = Utc::now();
        let record = SpecRecord::from_request(store.mint_id(now), now, &request, tasks);
        if let Err(e) = store.insert(record.clone()) {
            tracing::error!(path = %store.path().display(), error = %e, "failed to save spec history");
        }
        record
    })
    .await
    .map_err(|e| anyhow::anyhow!("task join error: {e}"))?;

    tracing::info!(
        id = %record.id,
        user_stories = record.tasks.user_stories.len(),
        engineering_tasks = record.tasks.engineering_tasks.len(),
        "generated spec"
    );
    Ok(record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
