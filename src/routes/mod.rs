//! HTTP route definitions and handlers.
//!
//! `/metrics` serves the latest snapshot, `/` redirects there, and `/health`
//! answers liveness probes. Every response is marked uncacheable.

mod health_routes;
mod metrics_routes;
mod root_routes;

use crate::state::AppState;
use crate::utils::http_helpers::no_cache_headers;
use axum::http::StatusCode;
use axum::{middleware, Router};

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(metrics_routes::routes())
        .merge(root_routes::routes())
        .merge(health_routes::routes())
        .fallback(not_found)
        .layer(middleware::map_response(no_cache_headers))
        .with_state(state)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
