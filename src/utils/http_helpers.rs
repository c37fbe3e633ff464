use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA, X_CONTENT_TYPE_OPTIONS};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use http::HeaderValue;
use tracing::error;

use crate::metrics::RenderError;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }
}

/// Converts our `HTTPError` into a plain-text HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

/// A scrape never returns partial output: rendering problems become a 500.
impl From<RenderError> for HTTPError {
    fn from(e: RenderError) -> Self {
        error!(
            event_name = "routes.metrics.render_error",
            event_domain = "routes",
            "Failed to render metrics: {}",
            e
        );
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render metrics")
    }
}

/// Response middleware marking every response as uncacheable.
pub async fn no_cache_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate, max-age=0"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}
