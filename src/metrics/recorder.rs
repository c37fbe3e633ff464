//! Exporter self-metrics using Prometheus.

use prometheus::{
    register_gauge_with_registry, register_histogram_with_registry,
    register_int_counter_vec_with_registry, register_int_gauge_with_registry, Encoder, Gauge,
    Histogram, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use super::RenderError;

/// Trait for recording refresh cycle outcomes.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records a successful cycle: monitor count, duration and completion time.
    fn record_refresh_success(&self, monitors: usize, duration_secs: f64, timestamp_secs: i64);

    /// Records a failed cycle with its error reason.
    fn record_refresh_failure(&self, reason: &str, duration_secs: f64);
}

/// Prometheus metrics about the exporter itself.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    refresh_total: IntCounterVec,
    refresh_errors_total: IntCounterVec,
    refresh_duration_seconds: Histogram,
    monitors: IntGauge,
    last_success_timestamp_seconds: Gauge,
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let refresh_total = register_int_counter_vec_with_registry!(
            Opts::new(
                "uptime_robot_exporter_refresh_total",
                "Total number of refresh cycles by result"
            ),
            &["result"],
            registry.clone()
        )
        .expect("Failed to register uptime_robot_exporter_refresh_total");

        let refresh_errors_total = register_int_counter_vec_with_registry!(
            Opts::new(
                "uptime_robot_exporter_refresh_errors_total",
                "Total number of failed refresh cycles by reason"
            ),
            &["reason"],
            registry.clone()
        )
        .expect("Failed to register uptime_robot_exporter_refresh_errors_total");

        let refresh_duration_seconds = register_histogram_with_registry!(
            "uptime_robot_exporter_refresh_duration_seconds",
            "Refresh cycle duration in seconds",
            vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
            registry.clone()
        )
        .expect("Failed to register uptime_robot_exporter_refresh_duration_seconds");

        let monitors = register_int_gauge_with_registry!(
            "uptime_robot_exporter_monitors",
            "Number of monitors returned by the last successful refresh",
            registry.clone()
        )
        .expect("Failed to register uptime_robot_exporter_monitors");

        let last_success_timestamp_seconds = register_gauge_with_registry!(
            "uptime_robot_exporter_last_success_timestamp_seconds",
            "Unix timestamp of the last successful refresh",
            registry.clone()
        )
        .expect("Failed to register uptime_robot_exporter_last_success_timestamp_seconds");

        // Expose both results from the start so rate() works on the first failure.
        for result in ["success", "failure"] {
            refresh_total.with_label_values(&[result]);
        }

        Metrics {
            registry,
            refresh_total,
            refresh_errors_total,
            refresh_duration_seconds,
            monitors,
            last_success_timestamp_seconds,
        }
    }

    /// Renders all self-metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, RenderError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| RenderError::Encode(e.to_string()))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for Metrics {
    fn record_refresh_success(&self, monitors: usize, duration_secs: f64, timestamp_secs: i64) {
        self.refresh_total.with_label_values(&["success"]).inc();
        self.refresh_duration_seconds.observe(duration_secs);
        self.monitors.set(monitors as i64);
        self.last_success_timestamp_seconds
            .set(timestamp_secs as f64);
    }

    fn record_refresh_failure(&self, reason: &str, duration_secs: f64) {
        self.refresh_total.with_label_values(&["failure"]).inc();
        self.refresh_errors_total.with_label_values(&[reason]).inc();
        self.refresh_duration_seconds.observe(duration_secs);
    }
}
