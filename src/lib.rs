//! Library exports for the Uptime Robot exporter, shared between the binary and tests.

pub mod config;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod scheduler;
pub mod startup;
pub mod state;
pub mod upstream;
pub mod utils;
