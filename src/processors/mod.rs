pub mod correlation_engine;
pub mod series_filter;
pub mod yearly_aggregator;

pub use correlation_engine::{correlate, CorrelationEngine};
pub use series_filter::{filter_by_station, select_columns, stations};
pub use yearly_aggregator::{aggregate_yearly, YearlyAggregator};
