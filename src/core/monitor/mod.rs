pub mod config;
pub mod manager;

pub use config::{ConfigError, MonitorConfig};
pub use manager::{CycleReport, MonitorManager, MonitorStats};
