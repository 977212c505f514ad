//! Liveness and readiness checks.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use super::{AppState, HealthLiveResponse, HealthReadyResponse};

/// `GET /api/health/live`
pub async fn health_live() -> Json<HealthLiveResponse> {
    Json(HealthLiveResponse { status: "ok" })
}

/// `GET /api/health/ready`
///
/// Answers 503 while the database cannot be reached.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            false
        }
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthReadyResponse {
            ready: database,
            database,
        }),
    )
        .into_response()
}
