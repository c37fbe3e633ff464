//! From monitors to exposed samples.
//!
//! `mapper` turns monitors into samples, `registry` holds the latest snapshot,
//! `exposition` renders it, and `recorder` tracks the exporter's own health.

mod exposition;
mod mapper;
mod recorder;
mod registry;

pub use exposition::{render_samples, RenderError};
pub use mapper::{
    map_monitors, RESPONSE_TIME_HELP, RESPONSE_TIME_METRIC, STATUS_HELP, STATUS_METRIC,
};
pub use recorder::{Metrics, MetricsRecorder};
pub use registry::SampleRegistry;
