use crate::models::Monitor;

use super::UpstreamError;

/// Something that can list the monitors to export.
///
/// Implemented by [`super::UptimeRobotClient`]; the scheduler only depends on
/// this trait.
#[async_trait::async_trait]
pub trait MonitorSource: Send + Sync {
    /// A descriptive name for logs.
    fn get_name(&self) -> &str;

    /// Fetch the full, current monitor list.
    async fn fetch_monitors(&self) -> Result<Vec<Monitor>, UpstreamError>;
}
