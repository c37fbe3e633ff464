//! Shared application state.
//!
//! Contains the state that is shared across all request handlers. Handlers
//! only read from the sample registry; the scheduler is the sole writer.

use crate::config::Config;
use crate::metrics::{Metrics, SampleRegistry};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<Config>,
    /// Latest published monitor samples.
    pub registry: Arc<SampleRegistry>,
    /// The exporter's own metrics, appended to every scrape.
    pub metrics: Metrics,
}
