use thiserror::Error;

/// Why a call to the Uptime Robot API did not produce a monitor list.
///
/// Every variant is recoverable: the scheduler keeps the previous snapshot and
/// tries again on its next tick.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to Uptime Robot timed out")]
    Timeout,

    #[error("error sending request: {0}")]
    Network(String),

    #[error("unexpected HTTP status code: {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("Uptime Robot error ({kind}): {message}")]
    Api { kind: String, message: String },
}

impl UpstreamError {
    /// Short, stable identifier used in logs and in the refresh error counter.
    pub fn reason(&self) -> &'static str {
        match self {
            UpstreamError::Timeout => "timeout",
            UpstreamError::Network(_) => "network",
            UpstreamError::Status(_) => "non2xx",
            UpstreamError::MalformedResponse(_) => "malformed-response",
            UpstreamError::Api { .. } => "api-error-code",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::MalformedResponse(e.to_string())
        } else {
            UpstreamError::Network(e.to_string())
        }
    }
}
