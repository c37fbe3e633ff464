use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::{ConfigError, LoggingConfig};

pub const DEFAULT_API_URL: &str = "https://api.uptimerobot.com/v2";
pub const DEFAULT_EXPORTER_NAME: &str = "uptime-robot-exporter";
pub const DEFAULT_PORT: u16 = 8123;

/// Exporter configuration.
///
/// Layered from defaults, an optional `./config.yaml`, then the environment
/// (`UPTIME_ROBOT_API_KEY` and `UPTIME_ROBOT_EXPORTER_*`).
#[derive(Deserialize, Serialize, Clone, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Uptime Robot API key (read-only keys are enough).
    pub api_key: String,
    /// Base URL of the Uptime Robot v2 API.
    pub api_url: String,
    pub bind_address: String,
    pub port: u16,
    /// Value of the `job` label on every exported sample.
    pub exporter_name: String,
    pub log_level: String,
    pub log_format: String,
    /// Seconds between two refresh cycles.
    pub refresh_interval: u64,
    /// Upper bound, in seconds, for one call to the Uptime Robot API.
    pub request_timeout: u64,
    /// Also request and export the latest response time of each monitor.
    pub response_times: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            exporter_name: DEFAULT_EXPORTER_NAME.to_string(),
            log_level: "info".to_string(),
            log_format: "console".to_string(),
            refresh_interval: 60,
            request_timeout: 10,
            response_times: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("exporter_name", &self.exporter_name)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("refresh_interval", &self.refresh_interval)
            .field("request_timeout", &self.request_timeout)
            .field("response_times", &self.response_times)
            .finish()
    }
}

impl Config {
    /// The default provider chain: defaults, `./config.yaml`, environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file("./config.yaml"))
            .merge(
                Env::prefixed("UPTIME_ROBOT_EXPORTER_").map(|key| {
                    let key = key.as_str();
                    if key.eq_ignore_ascii_case("name") {
                        "exporter_name".into()
                    } else if key.eq_ignore_ascii_case("loglevel") {
                        "log_level".into()
                    } else {
                        key.into()
                    }
                }),
            )
            .merge(
                Env::raw()
                    .only(&["UPTIME_ROBOT_API_KEY"])
                    .map(|_| "api_key".into()),
            )
    }

    /// Extract a configuration from `figment` and validate it.
    pub fn from_figment(figment: Figment) -> Result<Config, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field that cannot be expressed by its type alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.exporter_name.trim().is_empty() {
            return Err(ConfigError::invalid("exporter_name", "must not be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::invalid("port", "must be between 1 and 65535"));
        }
        if self.refresh_interval == 0 {
            return Err(ConfigError::invalid(
                "refresh_interval",
                "must be at least 1 second",
            ));
        }
        if self.request_timeout == 0 {
            return Err(ConfigError::invalid(
                "request_timeout",
                "must be at least 1 second",
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::invalid(
                "api_url",
                format!("'{}' is not an http(s) URL", self.api_url),
            ));
        }
        self.listen_addr()?;
        let logging = self.logging();
        logging.level_filter()?;
        logging.is_json()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.trim().parse().map_err(|_| {
            ConfigError::invalid(
                "bind_address",
                format!("'{}' is not an IP address", self.bind_address),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            service_name: env!("CARGO_PKG_NAME").to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Load and validate the configuration from `./config.yaml` and the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    Config::from_figment(Config::figment())
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_env_variables_are_mapped() {
        Jail::expect_with(|jail| {
            jail.set_env("UPTIME_ROBOT_API_KEY", "u123-secret");
            jail.set_env("UPTIME_ROBOT_EXPORTER_PORT", "9000");
            jail.set_env("UPTIME_ROBOT_EXPORTER_NAME", "my-exporter");
            jail.set_env("UPTIME_ROBOT_EXPORTER_LOGLEVEL", "DEBUG");
            jail.set_env("UPTIME_ROBOT_EXPORTER_REFRESH_INTERVAL", "30");

            let config = load_config().map_err(|e| e.to_string())?;
            assert_eq!(config.api_key, "u123-secret");
            assert_eq!(config.port, 9000);
            assert_eq!(config.exporter_name, "my-exporter");
            assert_eq!(config.log_level, "DEBUG");
            assert_eq!(config.refresh_interval(), Duration::from_secs(30));
            assert_eq!(config.api_url, DEFAULT_API_URL);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file_is_overridden_by_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "api_key: from-file\nport: 8200\nresponse_times: true\n",
            )?;
            jail.set_env("UPTIME_ROBOT_EXPORTER_PORT", "8300");

            let config = load_config().map_err(|e| e.to_string())?;
            assert_eq!(config.api_key, "from-file");
            assert_eq!(config.port, 8300);
            assert!(config.response_times);
            Ok(())
        });
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        Jail::expect_with(|_jail| {
            let result = load_config();
            assert!(matches!(result, Err(ConfigError::MissingApiKey)));
            Ok(())
        });
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("UPTIME_ROBOT_API_KEY", "key");
            jail.set_env("UPTIME_ROBOT_EXPORTER_PORT", "eighty");
            assert!(matches!(load_config(), Err(ConfigError::Extract(_))));
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = Config {
            api_key: "key".to_string(),
            ..Config::default()
        };
        assert!(base.validate().is_ok());

        let zero_interval = Config {
            refresh_interval: 0,
            ..base.clone()
        };
        assert!(matches!(
            zero_interval.validate(),
            Err(ConfigError::Invalid { field: "refresh_interval", .. })
        ));

        let bad_bind = Config {
            bind_address: "localhost".to_string(),
            ..base.clone()
        };
        assert!(matches!(
            bad_bind.validate(),
            Err(ConfigError::Invalid { field: "bind_address", .. })
        ));

        let bad_level = Config {
            log_level: "loud".to_string(),
            ..base
        };
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            api_key: "super-secret".to_string(),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
