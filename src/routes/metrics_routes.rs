//! Metrics exposition endpoint.

use crate::metrics::render_samples;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;
use axum::http::header::CONTENT_TYPE;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use tracing::debug;

/// Creates the metrics route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Handler for the /metrics endpoint.
///
/// Renders the latest snapshot followed by the exporter's own metrics. Before
/// the first successful refresh only the latter are present. Never talks to
/// the Uptime Robot API.
async fn metrics_handler(State(state): State<AppState>) -> Result<impl IntoResponse, HTTPError> {
    let mut body = match state.registry.current() {
        Some(snapshot) => {
            debug!(
                samples = snapshot.samples.len(),
                produced_at = %snapshot.produced_at,
                "Serving snapshot"
            );
            render_samples(&snapshot.samples)?
        }
        None => {
            debug!("No snapshot published yet, serving self-metrics only");
            String::new()
        }
    };
    body.push_str(&state.metrics.render()?);

    Ok((
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
