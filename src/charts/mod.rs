//! Display-ready chart specifications handed to the rendering surface.
//!
//! Nothing here computes statistics: adapters only arrange already
//! aggregated or filtered data and format labels.

pub mod adapters;
pub mod labels;

pub use adapters::{correlation_heatmap, scatter_chart, yearly_variation_chart};
pub use labels::variable_label;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Line(LineChart),
    Scatter(ScatterChart),
    Heatmap(HeatmapChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Line(chart) => &chart.title,
            ChartSpec::Scatter(chart) => &chart.title,
            ChartSpec::Heatmap(chart) => &chart.title,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: bool,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<LinePoint>,
}

/// A NaN `y` (group without observations) serializes as `null`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: i32,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: AxisValue,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Category(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub vmin: f64,
    pub vmax: f64,
    pub center: f64,
    pub annotate: bool,
}
