//! Health check controller.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use futures::future::join_all;
use libris_core::HealthStatus;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: &'static str,
    /// Application version.
    pub version: &'static str,
}

/// Result of one dependency check.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    #[serde(flatten)]
    pub status: HealthStatus,
}

/// Readiness response listing every dependency check.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: Vec<ComponentHealth>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check endpoint. Responds 503 when any dependency is down.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<ComponentHealth> = join_all(state.health_checks().iter().map(|check| async move {
        ComponentHealth {
            name: check.name().to_string(),
            status: check.check().await,
        }
    }))
    .await;

    let ready = checks.iter().all(|c| c.status.is_healthy());
    let (code, status) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (code, Json(ReadinessResponse { status, checks }))
}

/// Liveness check endpoint.
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
