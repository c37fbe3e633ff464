pub mod monitor;
pub mod sample;

pub use monitor::{Monitor, MonitorStatus, MonitorType};
pub use sample::{Sample, Snapshot};
