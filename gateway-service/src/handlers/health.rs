use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::{get_metrics, HealthReport};
use crate::startup::AppState;

/// Diagnostic report. Always 200; problems are described in the body.
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.health.check().await)
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
