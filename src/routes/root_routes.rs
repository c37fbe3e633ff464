use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Router};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(redirect_to_metrics))
        .route("/favicon.ico", get(favicon))
}

async fn redirect_to_metrics() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, "/metrics")])
}

// Browsers ask for it; an empty 200 keeps it out of the 404 logs.
async fn favicon() -> StatusCode {
    StatusCode::OK
}
