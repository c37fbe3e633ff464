use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use super::ConfigError;

/// LoggingConfig controls how we initialize tracing/logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct LoggingConfig {
    pub level: String,  // e.g. "info", "debug", "warn"
    pub format: String, // e.g. "json", "console"
    pub service_name: String,
    pub service_version: String,
}

impl LoggingConfig {
    /// Parse the level string. Python-style names (`WARNING`, `CRITICAL`) are
    /// accepted so existing deployments keep their environment untouched.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        match self.level.trim().to_lowercase().as_str() {
            "trace" => Ok(LevelFilter::TRACE),
            "debug" => Ok(LevelFilter::DEBUG),
            "info" => Ok(LevelFilter::INFO),
            "warn" | "warning" => Ok(LevelFilter::WARN),
            "error" | "critical" => Ok(LevelFilter::ERROR),
            _ => Err(ConfigError::invalid(
                "log_level",
                format!(
                    "'{}', valid values: trace, debug, info, warn, error",
                    self.level
                ),
            )),
        }
    }

    pub fn is_json(&self) -> Result<bool, ConfigError> {
        match self.format.trim().to_lowercase().as_str() {
            "json" => Ok(true),
            "console" => Ok(false),
            _ => Err(ConfigError::invalid(
                "log_format",
                format!("'{}', valid values: json, console", self.format),
            )),
        }
    }
}
