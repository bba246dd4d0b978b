//! Health check endpoint

use axum::{routing::get, Json, Router};
use qg_common::HealthResponse;

use crate::AppState;

/// GET /api/health
///
/// Liveness only; does not probe the sinks. `version` is the build
/// version stamped by `build.rs`.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: qg_common::time::now_iso8601(),
        version: env!("QG_BUILD_VERSION").to_string(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}
