use serde::{Deserialize, Serialize};

use crate::models::schema::normalize_pollutant_name;

/// Square, symmetric matrix of pairwise Pearson coefficients.
///
/// NaN marks pairs without a defined coefficient (constant column or no
/// overlapping observations); it serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn new(columns: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        Self { columns, values }
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied()
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        let column = normalize_pollutant_name(column);
        self.columns.iter().position(|c| c == column)
    }

    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        self.get(self.index_of(a)?, self.index_of(b)?)
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.size();
        (0..n).all(|i| {
            (0..n).all(|j| {
                let (a, b) = (self.values[i][j], self.values[j][i]);
                (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
            })
        })
    }
}
