use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{Column, Pollutant, Table, YearlyAggregateRecord};

/// Running sum and count of present values for one cell
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.sum / self.count as f64
        }
    }
}

pub struct YearlyAggregator;

impl YearlyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Mean of each requested column per (station, year), sorted by key.
    ///
    /// An empty request aggregates the six base pollutants.
    pub fn aggregate_yearly<S: AsRef<str>>(
        &self,
        table: &Table,
        pollutant_columns: &[S],
    ) -> Result<Vec<YearlyAggregateRecord>> {
        let columns = self.resolve_columns(table, pollutant_columns)?;

        let mut groups: BTreeMap<(&str, i32), Vec<MeanAccumulator>> = BTreeMap::new();
        for record in table.records() {
            let cells = groups
                .entry((record.station.as_str(), record.year()))
                .or_insert_with(|| vec![MeanAccumulator::default(); columns.len()]);

            for (cell, column) in cells.iter_mut().zip(&columns) {
                cell.add(record.numeric(*column));
            }
        }

        debug!(
            groups = groups.len(),
            columns = columns.len(),
            "Aggregated yearly means"
        );

        Ok(groups
            .into_iter()
            .map(|((station, year), cells)| {
                let means = columns
                    .iter()
                    .zip(cells)
                    .map(|(column, cell)| (column.name().to_string(), cell.mean()))
                    .collect();
                YearlyAggregateRecord::new(station, year, means)
            })
            .collect())
    }

    fn resolve_columns<S: AsRef<str>>(
        &self,
        table: &Table,
        names: &[S],
    ) -> Result<Vec<Column>> {
        if names.is_empty() {
            return Pollutant::BASE
                .iter()
                .map(|p| table.column(p.column_name()))
                .collect();
        }

        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let column = table.column(name.as_ref())?;
            if !column.is_numeric() {
                return Err(DashboardError::NonNumericColumn {
                    column: column.name().to_string(),
                });
            }
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        Ok(columns)
    }
}

impl Default for YearlyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper around [`YearlyAggregator::aggregate_yearly`]
pub fn aggregate_yearly<S: AsRef<str>>(
    table: &Table,
    pollutant_columns: &[S],
) -> Result<Vec<YearlyAggregateRecord>> {
    YearlyAggregator::new().aggregate_yearly(table, pollutant_columns)
}
