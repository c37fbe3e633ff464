use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use tracing::{debug, info};

use super::{MonitorSource, UpstreamError};
use crate::config::{Config, ConfigError};
use crate::models::Monitor;

/// Client for the `getMonitors` endpoint of the Uptime Robot v2 API.
pub struct UptimeRobotClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    response_times: bool,
}

impl UptimeRobotClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        let endpoint = format!("{}/getMonitors", config.api_url.trim_end_matches('/'));

        info!(
            endpoint = endpoint.as_str(),
            response_times = config.response_times,
            "Creating Uptime Robot client"
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.trim().to_string(),
            response_times: config.response_times,
        })
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![("api_key", self.api_key.as_str()), ("format", "json")];
        if self.response_times {
            form.extend([
                ("response_times", "1"),
                ("response_times_limit", "1"),
                ("response_times_average", "0"),
            ]);
        }
        form
    }
}

#[async_trait::async_trait]
impl MonitorSource for UptimeRobotClient {
    fn get_name(&self) -> &str {
        "uptime-robot"
    }

    async fn fetch_monitors(&self) -> Result<Vec<Monitor>, UpstreamError> {
        debug!("Sending getMonitors request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(CACHE_CONTROL, "no-cache")
            .form(&self.form())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_get_monitors(&body)
    }
}

#[derive(Deserialize)]
struct GetMonitorsResponse {
    stat: String,
    #[serde(default)]
    monitors: Option<Vec<Monitor>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a `getMonitors` response body.
///
/// `stat: "ok"` yields the monitors (a missing list counts as empty),
/// `stat: "fail"` yields [`UpstreamError::Api`], anything else is malformed.
pub fn parse_get_monitors(body: &str) -> Result<Vec<Monitor>, UpstreamError> {
    let response: GetMonitorsResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::MalformedResponse(format!("error parsing JSON: {}", e)))?;

    match response.stat.as_str() {
        "ok" => Ok(response.monitors.unwrap_or_default()),
        "fail" => {
            let error = response.error.unwrap_or(ApiErrorBody {
                kind: None,
                message: None,
            });
            Err(UpstreamError::Api {
                kind: error.kind.unwrap_or_else(|| "unknown".to_string()),
                message: error
                    .message
                    .unwrap_or_else(|| "no error message".to_string()),
            })
        }
        other => Err(UpstreamError::MalformedResponse(format!(
            "unknown stat '{}'",
            other
        ))),
    }
}
