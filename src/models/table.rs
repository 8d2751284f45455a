use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::models::measurement::MeasurementRecord;
use crate::models::schema::{Column, Schema};

/// Immutable measurement table: a (possibly projected) schema over shared records.
///
/// Cloning is cheap; projections share the underlying records and row filters
/// allocate a new record list.
#[derive(Debug, Clone)]
pub struct Table {
    schema: Schema,
    records: Arc<Vec<MeasurementRecord>>,
}

impl Table {
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Self {
            schema: Schema::full(),
            records: Arc::new(records),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub(crate) fn with_parts(schema: Schema, records: Arc<Vec<MeasurementRecord>>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub(crate) fn shared_records(&self) -> Arc<Vec<MeasurementRecord>> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.schema.names()
    }

    /// Resolve a column name against this table's schema
    pub fn column(&self, name: &str) -> Result<Column> {
        self.schema.resolve(name)
    }

    /// Values of a numeric column in row order; non-numeric columns yield all `None`
    pub fn numeric_values(&self, column: Column) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.numeric(column)).collect()
    }

    /// Earliest and latest timestamp, `None` for an empty table
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.records.first()?.timestamp;
        Some(self.records.iter().fold((first, first), |(min, max), r| {
            (min.min(r.timestamp), max.max(r.timestamp))
        }))
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<MeasurementRecord>> for Table {
    fn from(records: Vec<MeasurementRecord>) -> Self {
        Self::new(records)
    }
}
