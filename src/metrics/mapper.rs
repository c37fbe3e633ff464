//! Monitor → sample mapping.

use std::collections::BTreeMap;

use crate::models::{Monitor, Sample};

pub const STATUS_METRIC: &str = "uptime_robot_status";
pub const STATUS_HELP: &str = "Uptime Robot Status";
pub const RESPONSE_TIME_METRIC: &str = "uptime_robot_response_time";
pub const RESPONSE_TIME_HELP: &str = "Uptime Robot Response Time";

/// Convert monitors into samples.
///
/// Every monitor yields one `uptime_robot_status` sample whose value is the raw
/// status code. Monitors carrying a response time also yield one
/// `uptime_robot_response_time` sample with the same labels. Input order is
/// preserved and nothing is deduplicated.
pub fn map_monitors(monitors: &[Monitor], job: &str) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(monitors.len());
    for monitor in monitors {
        let labels = monitor_labels(monitor, job);
        if let Some(response_time) = monitor.response_time_ms {
            samples.push(Sample::new(
                RESPONSE_TIME_METRIC,
                RESPONSE_TIME_HELP,
                labels.clone(),
                response_time,
            ));
        }
        samples.push(Sample::new(
            STATUS_METRIC,
            STATUS_HELP,
            labels,
            f64::from(monitor.status.code()),
        ));
    }
    samples
}

fn monitor_labels(monitor: &Monitor, job: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("id".to_string(), monitor.id.clone()),
        ("friendly_name".to_string(), monitor.friendly_name.clone()),
        ("url".to_string(), monitor.url.clone()),
        ("type".to_string(), monitor.monitor_type.code().to_string()),
        ("status".to_string(), monitor.status.code().to_string()),
        ("interval".to_string(), monitor.interval.to_string()),
        ("timeout".to_string(), monitor.timeout.to_string()),
        (
            "create_datetime".to_string(),
            monitor.create_datetime.to_string(),
        ),
        ("job".to_string(), job.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonitorStatus, MonitorType};

    fn google() -> Monitor {
        Monitor {
            id: "783889671".to_string(),
            friendly_name: "Google".to_string(),
            url: "https://www.google.fr".to_string(),
            monitor_type: MonitorType::Http,
            status: MonitorStatus::Up,
            interval: 300,
            timeout: 30,
            create_datetime: 1684600296,
            response_time_ms: None,
        }
    }

    #[test]
    fn test_map_single_monitor() {
        let samples = map_monitors(&[google()], "uptime-robot-exporter");
        assert_eq!(samples.len(), 1);

        let sample = &samples[0];
        assert_eq!(sample.name, STATUS_METRIC);
        assert_eq!(sample.value, 2.0);
        let keys: Vec<_> = sample.labels.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "create_datetime",
                "friendly_name",
                "id",
                "interval",
                "job",
                "status",
                "timeout",
                "type",
                "url"
            ]
        );
        assert_eq!(sample.labels["status"], "2");
        assert_eq!(sample.labels["type"], "1");
        assert_eq!(sample.labels["job"], "uptime-robot-exporter");
    }

    #[test]
    fn test_map_is_idempotent() {
        let monitors = vec![google(), google()];
        assert_eq!(
            map_monitors(&monitors, "job"),
            map_monitors(&monitors, "job")
        );
    }

    #[test]
    fn test_map_empty() {
        assert!(map_monitors(&[], "job").is_empty());
    }

    #[test]
    fn test_map_keeps_unknown_codes() {
        let monitor = Monitor {
            monitor_type: MonitorType::Other(99),
            status: MonitorStatus::Other(42),
            ..google()
        };
        let samples = map_monitors(&[monitor], "job");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].labels["type"], "99");
        assert_eq!(samples[0].labels["status"], "42");
        assert_eq!(samples[0].labels.len(), 9);
        assert_eq!(samples[0].value, 42.0);
    }

    #[test]
    fn test_map_passes_duplicates_through() {
        let samples = map_monitors(&[google(), google()], "job");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0], samples[1]);
    }

    #[test]
    fn test_map_response_time() {
        let monitor = Monitor {
            response_time_ms: Some(245.0),
            ..google()
        };
        let samples = map_monitors(&[monitor], "job");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].name, RESPONSE_TIME_METRIC);
        assert_eq!(samples[0].value, 245.0);
        assert_eq!(samples[0].labels, samples[1].labels);
        assert_eq!(samples[1].name, STATUS_METRIC);
    }
}
