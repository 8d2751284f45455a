pub mod analyzers;
pub mod charts;
pub mod cli;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;

pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use processors::{aggregate_yearly, correlate, filter_by_station, select_columns};
pub use readers::load;
