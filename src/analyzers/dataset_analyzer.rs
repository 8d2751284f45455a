use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::Table;
use crate::processors::stations;

#[derive(Debug, Serialize)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub stations: Vec<String>,
    pub time_range: (NaiveDateTime, NaiveDateTime),
    pub columns: Vec<ColumnCoverage>,
}

#[derive(Debug, Serialize)]
pub struct ColumnCoverage {
    pub name: String,
    pub present: usize,
    pub mean: f64,
}

impl ColumnCoverage {
    pub fn present_percentage(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (self.present as f64 / total as f64) * 100.0
        }
    }
}

pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, table: &Table) -> Result<DatasetStatistics> {
        let time_range = table.time_range().ok_or_else(|| DashboardError::EmptySelection {
            reason: "no records to analyze".to_string(),
        })?;

        let columns = table
            .schema()
            .columns()
            .iter()
            .filter(|c| c.is_numeric())
            .map(|column| {
                let (sum, present) = table
                    .records()
                    .iter()
                    .filter_map(|r| r.numeric(*column))
                    .filter(|v| !v.is_nan())
                    .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

                ColumnCoverage {
                    name: column.name().to_string(),
                    present,
                    mean: if present > 0 {
                        sum / present as f64
                    } else {
                        f64::NAN
                    },
                }
            })
            .collect();

        Ok(DatasetStatistics {
            total_records: table.len(),
            stations: stations(table),
            time_range,
            columns,
        })
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStatistics {
    pub fn summary(&self) -> String {
        format!(
            "Stations: {} ({})\n\
            Time Range: {} to {} ({} years)\n\
            Records: {} total",
            self.stations.len(),
            self.stations.join(", "),
            self.time_range.0,
            self.time_range.1,
            self.time_range.1.signed_duration_since(self.time_range.0).num_days() / 365,
            self.total_records,
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut summary = self.summary();
        summary.push_str("\n\nColumn Coverage:\n");

        for column in &self.columns {
            let mean = if column.mean.is_nan() {
                "No valid measurements".to_string()
            } else {
                format!("mean {:.2}", column.mean)
            };
            summary.push_str(&format!(
                "- {:<14} {:>8}/{} present ({:.1}%), {}\n",
                column.name,
                column.present,
                self.total_records,
                column.present_percentage(self.total_records),
                mean
            ));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeasurementRecord, Pollutant};
    use chrono::NaiveDate;

    fn record(station: &str, year: i32, pm25: Option<f64>) -> MeasurementRecord {
        let ts = NaiveDate::from_ymd_opt(year, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut record = MeasurementRecord::empty(station, ts);
        record.pm25 = pm25;
        record
    }

    #[test]
    fn test_analyze() -> Result<()> {
        let table = Table::new(vec![
            record("Shunyi", 2015, Some(10.0)),
            record("Wanliu", 2013, None),
            record("Shunyi", 2017, Some(20.0)),
        ]);

        let stats = DatasetAnalyzer::new().analyze(&table)?;

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.stations, vec!["Shunyi", "Wanliu"]);
        assert_eq!(stats.time_range.0.date(), NaiveDate::from_ymd_opt(2013, 1, 1).unwrap());
        assert_eq!(stats.time_range.1.date(), NaiveDate::from_ymd_opt(2017, 1, 1).unwrap());

        let pm25 = stats
            .columns
            .iter()
            .find(|c| c.name == Pollutant::Pm25.column_name())
            .unwrap();
        assert_eq!(pm25.present, 2);
        assert_eq!(pm25.mean, 15.0);

        let co = stats.columns.iter().find(|c| c.name == "CO").unwrap();
        assert_eq!(co.present, 0);
        assert!(co.mean.is_nan());

        assert!(stats.columns.iter().all(|c| c.name != "wd"));
        assert!(stats.detailed_summary().contains("No valid measurements"));
        Ok(())
    }

    #[test]
    fn test_empty_table() {
        let result = DatasetAnalyzer::new().analyze(&Table::empty());
        assert!(matches!(result, Err(DashboardError::EmptySelection { .. })));
    }
}
