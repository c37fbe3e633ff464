// Re-exports so callers can "use crate::config::*".
pub mod error;
pub mod logging;
pub mod types;

pub use error::*;
pub use logging::*;
pub use types::*;
