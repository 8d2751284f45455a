pub mod config;
pub mod constants;
pub mod progress;

pub use config::DashboardConfig;
pub use constants::*;
pub use progress::ProgressReporter;
