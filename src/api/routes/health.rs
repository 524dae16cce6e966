//! Health Routes
//!
//! - GET / - Liveness confirmation (static string)
//! - GET /health - Full status with live pairing counters

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /
///
/// Liveness confirmation for uptime checks and load balancers.
pub async fn root() -> &'static str {
    "tandem backend is live"
}

/// GET /health
///
/// Full status: uptime, version, and live pairing counters.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        connections: state.hub.connection_count().await,
        waiting: state.pairing.waiting_count().await,
        active_pairs: state.pairing.active_pair_count().await,
    })
}
