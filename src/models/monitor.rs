use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::value::value_to_string;

/// The kind of check a monitor performs, as reported by the `type` field.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(from = "u32")]
pub enum MonitorType {
    Http,
    Keyword,
    Ping,
    Port,
    Heartbeat,
    /// A code this exporter does not know about yet. The raw value is kept.
    Other(u32),
}

impl MonitorType {
    pub fn code(self) -> u32 {
        match self {
            MonitorType::Http => 1,
            MonitorType::Keyword => 2,
            MonitorType::Ping => 3,
            MonitorType::Port => 4,
            MonitorType::Heartbeat => 5,
            MonitorType::Other(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MonitorType::Http => "http",
            MonitorType::Keyword => "keyword",
            MonitorType::Ping => "ping",
            MonitorType::Port => "port",
            MonitorType::Heartbeat => "heartbeat",
            MonitorType::Other(_) => "other",
        }
    }
}

impl From<u32> for MonitorType {
    fn from(code: u32) -> Self {
        match code {
            1 => MonitorType::Http,
            2 => MonitorType::Keyword,
            3 => MonitorType::Ping,
            4 => MonitorType::Port,
            5 => MonitorType::Heartbeat,
            other => MonitorType::Other(other),
        }
    }
}

/// The monitor state, as reported by the `status` field.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(from = "u32")]
pub enum MonitorStatus {
    Paused,
    NotCheckedYet,
    Up,
    SeemsDown,
    Down,
    /// A code this exporter does not know about yet. The raw value is kept.
    Other(u32),
}

impl MonitorStatus {
    pub fn code(self) -> u32 {
        match self {
            MonitorStatus::Paused => 0,
            MonitorStatus::NotCheckedYet => 1,
            MonitorStatus::Up => 2,
            MonitorStatus::SeemsDown => 8,
            MonitorStatus::Down => 9,
            MonitorStatus::Other(code) => code,
        }
    }

    /// True for both "seems down" and "down".
    pub fn is_down(self) -> bool {
        matches!(self, MonitorStatus::SeemsDown | MonitorStatus::Down)
    }
}

impl From<u32> for MonitorStatus {
    fn from(code: u32) -> Self {
        match code {
            0 => MonitorStatus::Paused,
            1 => MonitorStatus::NotCheckedYet,
            2 => MonitorStatus::Up,
            8 => MonitorStatus::SeemsDown,
            9 => MonitorStatus::Down,
            other => MonitorStatus::Other(other),
        }
    }
}

/// A single monitor as returned by `getMonitors`.
///
/// Fields the exporter does not expose are ignored. Fields that the API omits
/// or sends as `null` for some monitor kinds (heartbeat monitors have no
/// timeout, for instance) default to empty or zero.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Monitor {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub friendly_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "type")]
    pub monitor_type: MonitorType,
    pub status: MonitorStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interval: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeout: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub create_datetime: i64,
    /// Most recent response time in milliseconds, only present when response
    /// times were requested.
    #[serde(
        default,
        rename = "response_times",
        deserialize_with = "deserialize_latest_response_time"
    )]
    pub response_time_ms: Option<f64>,
}

/// The API sends ids as JSON numbers, older payloads and some proxies as strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ (Value::String(_) | Value::Number(_)) => Ok(value_to_string(value)),
        other => Err(D::Error::custom(format!(
            "monitor id must be a string or a number, got {}",
            other
        ))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct ResponseTime {
    value: f64,
}

fn deserialize_latest_response_time<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let times = Option::<Vec<ResponseTime>>::deserialize(deserializer)?;
    Ok(times.and_then(|times| times.first().map(|t| t.value)))
}
