use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Schema, Table};

/// Rows recorded at `station`; an empty table when none match
pub fn filter_by_station(table: &Table, station: &str) -> Table {
    let records: Vec<_> = table
        .records()
        .iter()
        .filter(|r| r.station == station)
        .cloned()
        .collect();

    Table::with_parts(table.schema().clone(), Arc::new(records))
}

/// Project the table onto `names`, in the requested order
pub fn select_columns<S: AsRef<str>>(table: &Table, names: &[S]) -> Result<Table> {
    let columns = names
        .iter()
        .map(|name| table.column(name.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(Table::with_parts(
        Schema::from_columns(columns),
        table.shared_records(),
    ))
}

/// Distinct station identifiers in order of first appearance
pub fn stations(table: &Table) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .records()
        .iter()
        .filter(|r| seen.insert(r.station.as_str()))
        .map(|r| r.station.clone())
        .collect()
}
