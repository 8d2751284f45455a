use serde::{Deserialize, Serialize};

use crate::models::schema::normalize_pollutant_name;

/// Per-(station, year) means of the requested pollutant columns.
///
/// A mean is NaN when the group has no present value for that column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyAggregateRecord {
    pub station: String,
    pub year: i32,
    pub means: Vec<(String, f64)>,
}

impl YearlyAggregateRecord {
    pub fn new(station: impl Into<String>, year: i32, means: Vec<(String, f64)>) -> Self {
        Self {
            station: station.into(),
            year,
            means,
        }
    }

    /// Mean for a column, looked up with pollutant alias normalization
    pub fn mean(&self, column: &str) -> Option<f64> {
        let column = normalize_pollutant_name(column);
        self.means
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| *value)
    }

    pub fn key(&self) -> (&str, i32) {
        (self.station.as_str(), self.year)
    }
}
