use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{Column, CorrelationMatrix, Table};

pub struct CorrelationEngine {
    min_periods: usize,
}

impl CorrelationEngine {
    pub fn new() -> Self {
        Self { min_periods: 1 }
    }

    /// Minimum number of complete pairs for a coefficient to be reported
    pub fn with_min_periods(min_periods: usize) -> Self {
        Self {
            min_periods: min_periods.max(1),
        }
    }

    /// Pairwise-complete Pearson matrix over the numeric columns of the selection.
    ///
    /// Variables come first, then pollutants; duplicates are collapsed and
    /// non-numeric columns such as `wd` are dropped without error.
    pub fn correlate<V: AsRef<str>, P: AsRef<str>>(
        &self,
        table: &Table,
        variable_columns: &[V],
        pollutant_columns: &[P],
    ) -> Result<CorrelationMatrix> {
        let mut selected: Vec<Column> = Vec::new();
        let names = variable_columns
            .iter()
            .map(|n| n.as_ref())
            .chain(pollutant_columns.iter().map(|n| n.as_ref()));
        for name in names {
            let column = table.column(name)?;
            if !selected.contains(&column) {
                selected.push(column);
            }
        }

        let retained: Vec<Column> = selected.into_iter().filter(|c| c.is_numeric()).collect();
        if retained.len() < 2 {
            return Err(DashboardError::EmptySelection {
                reason: format!(
                    "correlation needs at least 2 numeric columns, {} selected",
                    retained.len()
                ),
            });
        }

        let series: Vec<Vec<Option<f64>>> =
            retained.iter().map(|c| table.numeric_values(*c)).collect();

        let n = retained.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in 0..=i {
                let r = self.pearson(&series[i], &series[j], i == j);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        debug!(columns = n, rows = table.len(), "Computed correlation matrix");

        Ok(CorrelationMatrix::new(
            retained.iter().map(|c| c.name().to_string()).collect(),
            values,
        ))
    }

    /// Pearson coefficient over rows where both values are present.
    ///
    /// NaN when there are too few pairs or either side has zero variance.
    fn pearson(&self, x: &[Option<f64>], y: &[Option<f64>], diagonal: bool) -> f64 {
        let pairs: Vec<(f64, f64)> = x
            .iter()
            .zip(y)
            .filter_map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
                _ => None,
            })
            .collect();

        if pairs.len() < self.min_periods {
            return f64::NAN;
        }
        // Exact check: a rounded mean leaves residual variance on constant input
        if is_constant(pairs.iter().map(|(a, _)| *a)) || is_constant(pairs.iter().map(|(_, b)| *b))
        {
            return f64::NAN;
        }

        let count = pairs.len() as f64;
        let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / count;
        let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / count;

        let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
        for (a, b) in &pairs {
            let dx = a - mean_x;
            let dy = b - mean_y;
            sxy += dx * dy;
            sxx += dx * dx;
            syy += dy * dy;
        }

        let divisor = (sxx * syy).sqrt();
        if divisor == 0.0 {
            return f64::NAN;
        }
        if diagonal {
            return 1.0;
        }

        (sxy / divisor).clamp(-1.0, 1.0)
    }
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

impl Default for CorrelationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper around [`CorrelationEngine::correlate`]
pub fn correlate<V: AsRef<str>, P: AsRef<str>>(
    table: &Table,
    variable_columns: &[V],
    pollutant_columns: &[P],
) -> Result<CorrelationMatrix> {
    CorrelationEngine::new().correlate(table, variable_columns, pollutant_columns)
}
