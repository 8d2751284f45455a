use crate::charts::labels::{join_labels, variable_label};
use crate::charts::{
    AxisValue, HeatmapChart, LineChart, LinePoint, LineSeries, ScatterChart, ScatterPoint,
};
use crate::error::{DashboardError, Result};
use crate::models::{
    normalize_pollutant_name, Column, ColumnKind, CorrelationMatrix, MeasurementRecord, Table,
    YearlyAggregateRecord,
};
use crate::utils::constants::{HEATMAP_TITLE, YEARLY_X_LABEL, YEARLY_Y_LABEL};

/// One line per (station, pollutant) through the yearly means.
///
/// `station_order` fixes the series order, normally the stations in order of
/// first appearance in the source table.
pub fn yearly_variation_chart<S: AsRef<str>>(
    aggregates: &[YearlyAggregateRecord],
    station_order: &[String],
    pollutants: &[S],
) -> Result<LineChart> {
    let pollutants: Vec<&str> = pollutants.iter().map(|p| canonical_name(p.as_ref())).collect();

    let mut series = Vec::with_capacity(station_order.len() * pollutants.len());
    for station in station_order {
        for pollutant in &pollutants {
            let points = aggregates
                .iter()
                .filter(|a| &a.station == station)
                .map(|a| {
                    a.mean(pollutant)
                        .map(|y| LinePoint { x: a.year, y })
                        .ok_or_else(|| DashboardError::column_not_found(*pollutant))
                })
                .collect::<Result<Vec<_>>>()?;

            series.push(LineSeries {
                label: format!("{} - {}", station, pollutant),
                points,
            });
        }
    }

    Ok(LineChart {
        title: format!(
            "Variasi Tahunan {} di Semua Stasiun",
            join_labels(&pollutants)
        ),
        x_label: YEARLY_X_LABEL.to_string(),
        y_label: YEARLY_Y_LABEL.to_string(),
        legend: true,
        series,
    })
}

/// Pollutant level against an environmental variable for a single station
pub fn scatter_chart(table: &Table, variable: &str, pollutant: &str) -> Result<ScatterChart> {
    let x_column = table.column(variable)?;
    let y_column = table.column(pollutant)?;

    if !y_column.is_numeric() {
        return Err(DashboardError::NonNumericColumn {
            column: y_column.name().to_string(),
        });
    }

    let station = table
        .records()
        .first()
        .map(|r| r.station.clone())
        .ok_or_else(|| DashboardError::EmptySelection {
            reason: "no rows to plot for the selected station".to_string(),
        })?;

    let points = table
        .records()
        .iter()
        .filter_map(|r| {
            let x = axis_value(r, x_column)?;
            let y = r.numeric(y_column).filter(|y| !y.is_nan())?;
            Some(ScatterPoint { x, y })
        })
        .collect();

    Ok(ScatterChart {
        title: format!(
            "Tingkat Polusi Udara terhadap {} di {}",
            variable_label(x_column.name()),
            station
        ),
        x_label: x_column.name().to_string(),
        y_label: y_column.name().to_string(),
        points,
    })
}

/// Heatmap over the full [-1, 1] range, centered on zero, with annotated cells
pub fn correlation_heatmap(matrix: &CorrelationMatrix) -> HeatmapChart {
    HeatmapChart {
        title: HEATMAP_TITLE.to_string(),
        labels: matrix.columns.clone(),
        values: matrix.values.clone(),
        vmin: -1.0,
        vmax: 1.0,
        center: 0.0,
        annotate: true,
    }
}

/// Column name as the aggregator and table store it: trimmed, alias resolved
fn canonical_name(name: &str) -> &str {
    Column::parse(name)
        .map(|column| column.name())
        .unwrap_or_else(|| normalize_pollutant_name(name.trim()))
}

fn axis_value(record: &MeasurementRecord, column: Column) -> Option<AxisValue> {
    match column.kind() {
        ColumnKind::Numeric => record
            .numeric(column)
            .filter(|x| !x.is_nan())
            .map(AxisValue::Number),
        ColumnKind::Categorical => record
            .category(column)
            .map(|c| AxisValue::Category(c.to_string())),
        ColumnKind::Timestamp => Some(AxisValue::Category(record.timestamp.to_string())),
    }
}
