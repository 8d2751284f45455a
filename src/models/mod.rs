pub mod aggregate;
pub mod correlation;
pub mod measurement;
pub mod schema;
pub mod table;

pub use aggregate::YearlyAggregateRecord;
pub use correlation::CorrelationMatrix;
pub use measurement::MeasurementRecord;
pub use schema::{normalize_pollutant_name, Column, ColumnKind, Pollutant, Schema, Variable};
pub use table::Table;
