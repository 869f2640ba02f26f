//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness check (checks the user store)
//! - /health/live - Liveness check

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<&'static str>,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store: None,
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Readiness check
///
/// Returns 503 while the user store is unreachable. The failure detail is
/// logged by the store, not echoed here.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match state.store().health_check().await {
        Ok(()) => Ok(Json(HealthResponse {
            store: Some("healthy"),
            ..HealthResponse::new("ready")
        })),
        Err(_) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                store: Some("unhealthy"),
                ..HealthResponse::new("not_ready")
            }),
        )),
    }
}

/// Liveness check - always OK while the server runs
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}
