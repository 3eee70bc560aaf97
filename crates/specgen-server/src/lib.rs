pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Generation
        .route(
            "/api/generate-tasks",
            post(routes::generate::generate_tasks),
        )
        // History
        .route("/api/specs", get(routes::specs::list_specs))
        .route("/api/specs/{id}", get(routes::specs::get_spec))
        .route("/api/specs/{id}/export", get(routes::specs::export_spec))
        // Health
        .route("/api/health", get(routes::health::health))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the API server on a pre-bound listener.
///
/// Accepting an already-bound `TcpListener` lets the caller read the actual
/// port first (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    tracing::info!(
        provider = %app_state.config.provider,
        history = %app_state.store.path().display(),
        "specgen API listening on http://localhost:{actual_port}"
    );

    let app = build_router(app_state);
    axum::serve(listener, app).await?;
    Ok(())
}
