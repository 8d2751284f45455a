use std::sync::Arc;

use tracing::{info, instrument};

use crate::charts::{self, ChartSpec};
use crate::error::Result;
use crate::models::Table;
use crate::processors::{filter_by_station, stations, CorrelationEngine, YearlyAggregator};
use crate::readers::DatasetReader;
use crate::utils::config::DashboardConfig;
use crate::utils::progress::ProgressReporter;

/// One dashboard session: the source table loaded once, every view recomputed
/// from it on demand.
pub struct Dashboard {
    table: Arc<Table>,
    stations: Vec<String>,
    config: DashboardConfig,
    aggregator: YearlyAggregator,
    correlation: CorrelationEngine,
}

impl Dashboard {
    pub fn open(config: DashboardConfig, progress: Option<&ProgressReporter>) -> Result<Self> {
        config.check()?;
        let table = DatasetReader::from_config(&config).read_table(&config.data_path, progress)?;
        Ok(Self::from_table(table, config))
    }

    pub fn from_table(table: Table, config: DashboardConfig) -> Self {
        let stations = stations(&table);
        Self {
            table: Arc::new(table),
            stations,
            config,
            aggregator: YearlyAggregator::new(),
            correlation: CorrelationEngine::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Stations in order of first appearance, as offered by the station selector
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Yearly means of the selected pollutants for every station
    #[instrument(skip(self))]
    pub fn yearly_variation(&self, pollutants: &[String]) -> Result<ChartSpec> {
        let pollutants = self.or_default(pollutants, &self.config.default_pollutants);
        let aggregates = self.aggregator.aggregate_yearly(&self.table, pollutants)?;
        let chart = charts::yearly_variation_chart(&aggregates, &self.stations, pollutants)?;

        info!(series = chart.series.len(), "Prepared yearly variation chart");
        Ok(ChartSpec::Line(chart))
    }

    /// Pollutant against one environmental variable at a single station
    #[instrument(skip(self))]
    pub fn scatter(&self, station: &str, variable: &str, pollutant: &str) -> Result<ChartSpec> {
        let station_table = filter_by_station(&self.table, station);
        let chart = charts::scatter_chart(&station_table, variable, pollutant)?;

        info!(points = chart.points.len(), "Prepared scatter chart");
        Ok(ChartSpec::Scatter(chart))
    }

    /// Correlation heatmap over the selected variables and pollutants.
    ///
    /// Empty selections fall back to the configured defaults.
    #[instrument(skip(self))]
    pub fn heatmap(&self, variables: &[String], pollutants: &[String]) -> Result<ChartSpec> {
        let variables = self.or_default(variables, &self.config.default_variables);
        let pollutants = self.or_default(pollutants, &self.config.default_pollutants);

        let matrix = self.correlation.correlate(&self.table, variables, pollutants)?;
        info!(columns = matrix.size(), "Prepared correlation heatmap");
        Ok(ChartSpec::Heatmap(charts::correlation_heatmap(&matrix)))
    }

    fn or_default<'a>(&self, selection: &'a [String], default: &'a [String]) -> &'a [String] {
        if selection.is_empty() {
            default
        } else {
            selection
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::{MeasurementRecord, Pollutant, Variable};
    use chrono::NaiveDate;

    fn dashboard() -> Dashboard {
        let mut records = Vec::new();
        for (i, station) in ["Gucheng", "Dingling"].iter().enumerate() {
            for year in [2013, 2014] {
                for hour in 0..3 {
                    let ts = NaiveDate::from_ymd_opt(year, 6, 1)
                        .unwrap()
                        .and_hms_opt(hour, 0, 0)
                        .unwrap();
                    let base = (i as f64 + 1.0) * 10.0 + hour as f64;
                    records.push(
                        MeasurementRecord::empty(*station, ts)
                            .with_pollutant(Pollutant::Pm25, base)
                            .with_pollutant(Pollutant::Co, base * 2.0)
                            .with_variable(Variable::Temperature, base - 5.0)
                            .with_wind_direction("NE"),
                    );
                }
            }
        }
        Dashboard::from_table(Table::new(records), DashboardConfig::default())
    }

    #[test]
    fn test_stations() {
        assert_eq!(dashboard().stations(), ["Gucheng", "Dingling"]);
    }

    #[test]
    fn test_yearly_variation() -> Result<()> {
        let chart = dashboard().yearly_variation(&["PM2.5".to_string()])?;
        match chart {
            ChartSpec::Line(line) => {
                assert_eq!(line.series.len(), 2);
                assert_eq!(line.series[0].label, "Gucheng - PM2.5");
                assert_eq!(line.series[0].points.len(), 2);
                assert_eq!(line.series[0].points[0].y, 11.0);
                assert_eq!(line.series[1].points[1].y, 21.0);
            }
            other => panic!("expected line chart, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_yearly_variation_padded_and_alias_names() -> Result<()> {
        let dashboard = dashboard();
        let chart = dashboard.yearly_variation(&["PM2.5".to_string(), " CO".to_string()])?;
        match chart {
            ChartSpec::Line(line) => {
                assert_eq!(line.title, "Variasi Tahunan PM2.5, CO di Semua Stasiun");
                assert_eq!(line.series[1].label, "Gucheng - CO");
                assert_eq!(line.series[1].points[0].y, 22.0);
            }
            other => panic!("expected line chart, got {:?}", other),
        }

        let chart = dashboard.yearly_variation(&["polusi udara".to_string()])?;
        match chart {
            ChartSpec::Line(line) => {
                assert_eq!(line.series[0].label, "Gucheng - Air Pollution");
                assert!(line.series[0].points[0].y.is_nan());
            }
            other => panic!("expected line chart, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_yearly_variation_defaults_to_all_base_pollutants() -> Result<()> {
        let chart = dashboard().yearly_variation(&[])?;
        match chart {
            ChartSpec::Line(line) => assert_eq!(line.series.len(), 2 * 6),
            other => panic!("expected line chart, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_scatter() -> Result<()> {
        let chart = dashboard().scatter("Dingling", "TEMP", "CO")?;
        assert_eq!(chart.title(), "Tingkat Polusi Udara terhadap Suhu di Dingling");
        Ok(())
    }

    #[test]
    fn test_scatter_unknown_station() {
        let result = dashboard().scatter("Nowhere", "TEMP", "CO");
        assert!(matches!(result, Err(DashboardError::EmptySelection { .. })));
    }

    #[test]
    fn test_heatmap_with_defaults() -> Result<()> {
        let chart = dashboard().heatmap(&[], &[])?;
        match chart {
            ChartSpec::Heatmap(heatmap) => {
                // wd is categorical and dropped; remaining defaults are numeric
                assert_eq!(heatmap.labels.len(), 5 + 6);
                assert!(!heatmap.labels.iter().any(|l| l == "wd"));
            }
            other => panic!("expected heatmap, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_heatmap_selection() -> Result<()> {
        let chart = dashboard().heatmap(&["TEMP".to_string()], &["PM2.5".to_string()])?;
        match chart {
            ChartSpec::Heatmap(heatmap) => {
                assert_eq!(heatmap.labels, vec!["TEMP", "PM2.5"]);
                assert!((heatmap.values[0][1] - 1.0).abs() < 1e-9);
            }
            other => panic!("expected heatmap, got {:?}", other),
        }
        Ok(())
    }
}
