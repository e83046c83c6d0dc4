use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the backend answered at all.
    pub backend_reachable: bool,
}

/// GET /health -- returns service and backend health.
///
/// Always 200; an unreachable backend only downgrades `status`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_reachable = state.backend.ping().await;

    let status = if backend_reachable { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        backend_reachable,
    })
}

/// Mount health check routes at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
