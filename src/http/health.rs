//! Health endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::upstream::resolve;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub configured: bool,
}

/// GET /api/health — reports readiness without exposing the endpoint,
/// credential, or auth scheme.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    let endpoint = resolve(&state.config.upstream);
    Json(HealthStatus {
        status: "ok",
        configured: endpoint.is_configured(),
    })
}
