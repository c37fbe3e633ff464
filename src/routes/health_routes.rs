//! Health check endpoints.

use crate::state::AppState;
use axum::{
    body::Body,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Returns a 200 OK status to indicate the process is serving.
///
/// This says nothing about upstream freshness; see
/// `uptime_robot_exporter_last_success_timestamp_seconds` for that.
async fn health_check() -> impl IntoResponse {
    Response::new(Body::from("OK"))
}
