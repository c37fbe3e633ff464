//! Access to the Uptime Robot API.

mod base;
mod error;
mod uptime_robot;

pub use base::MonitorSource;
pub use error::UpstreamError;
pub use uptime_robot::{parse_get_monitors, UptimeRobotClient};
