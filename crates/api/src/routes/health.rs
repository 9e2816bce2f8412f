//! Health check endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always true when the response is 200.
    pub ok: bool,
    /// Service version.
    pub version: &'static str,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// Health check handler; fails with 503 when the database is unreachable.
async fn health_check(State(state): State<AppState>) -> Response {
    if let Err(e) = state.db.ping().await {
        error!(error = %e, "Database health check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "SERVICE_UNAVAILABLE",
                "message": "Database health check failed."
            })),
        )
            .into_response();
    }

    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
    .into_response()
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
