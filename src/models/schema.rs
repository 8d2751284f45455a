use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::utils::constants::{AIR_POLLUTION_ALIAS, AIR_POLLUTION_COLUMN, DATE_COLUMN, STATION_COLUMN};

/// Map a free-text pollutant label onto its canonical column name.
///
/// Any case variant of `"polusi udara"` becomes `"Air Pollution"`; every other
/// name is returned unchanged. Every column lookup in the crate goes through
/// this function so that both spellings address the same column.
pub fn normalize_pollutant_name(name: &str) -> &str {
    if name.eq_ignore_ascii_case(AIR_POLLUTION_ALIAS) {
        AIR_POLLUTION_COLUMN
    } else {
        name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pollutant {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
    AirPollution,
}

impl Pollutant {
    pub const ALL: [Pollutant; 7] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
        Pollutant::AirPollution,
    ];

    /// Pollutants offered by the yearly-variation and heatmap selectors
    pub const BASE: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    pub fn parse(label: &str) -> Option<Self> {
        match normalize_pollutant_name(label.trim()) {
            "PM2.5" => Some(Pollutant::Pm25),
            "PM10" => Some(Pollutant::Pm10),
            "SO2" => Some(Pollutant::So2),
            "NO2" => Some(Pollutant::No2),
            "CO" => Some(Pollutant::Co),
            "O3" => Some(Pollutant::O3),
            AIR_POLLUTION_COLUMN => Some(Pollutant::AirPollution),
            _ => None,
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
            Pollutant::AirPollution => AIR_POLLUTION_COLUMN,
        }
    }
}

impl std::str::FromStr for Pollutant {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Pollutant::parse(s).ok_or_else(|| DashboardError::UnknownLabel {
            label: s.to_string(),
        })
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Environmental (meteorological) variables recorded alongside pollutants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variable {
    Temperature,
    Pressure,
    DewPoint,
    Rain,
    WindDirection,
    WindSpeed,
}

impl Variable {
    pub const ALL: [Variable; 6] = [
        Variable::Temperature,
        Variable::Pressure,
        Variable::DewPoint,
        Variable::Rain,
        Variable::WindDirection,
        Variable::WindSpeed,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "TEMP" => Some(Variable::Temperature),
            "PRES" => Some(Variable::Pressure),
            "DEWP" => Some(Variable::DewPoint),
            "RAIN" => Some(Variable::Rain),
            "wd" => Some(Variable::WindDirection),
            "WSPM" => Some(Variable::WindSpeed),
            _ => None,
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            Variable::Temperature => "TEMP",
            Variable::Pressure => "PRES",
            Variable::DewPoint => "DEWP",
            Variable::Rain => "RAIN",
            Variable::WindDirection => "wd",
            Variable::WindSpeed => "WSPM",
        }
    }

    /// Human-readable (Indonesian) label used in chart titles
    pub fn label(&self) -> &'static str {
        match self {
            Variable::Temperature => "Suhu",
            Variable::Pressure => "Tekanan",
            Variable::DewPoint => "Titik Embun",
            Variable::Rain => "Hujan",
            Variable::WindDirection => "Arah Angin",
            Variable::WindSpeed => "Kecepatan Angin",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Variable::WindDirection => ColumnKind::Categorical,
            _ => ColumnKind::Numeric,
        }
    }
}

impl std::str::FromStr for Variable {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Variable::parse(s).ok_or_else(|| DashboardError::UnknownLabel {
            label: s.to_string(),
        })
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Categorical,
    Timestamp,
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Station,
    Timestamp,
    Variable(Variable),
    Pollutant(Pollutant),
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Station => STATION_COLUMN,
            Column::Timestamp => DATE_COLUMN,
            Column::Variable(v) => v.column_name(),
            Column::Pollutant(p) => p.column_name(),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Station => ColumnKind::Categorical,
            Column::Timestamp => ColumnKind::Timestamp,
            Column::Variable(v) => v.kind(),
            Column::Pollutant(_) => ColumnKind::Numeric,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    /// Parse a column name, applying pollutant alias normalization first
    pub fn parse(name: &str) -> Option<Self> {
        let name = normalize_pollutant_name(name.trim());
        match name {
            STATION_COLUMN => Some(Column::Station),
            DATE_COLUMN => Some(Column::Timestamp),
            _ => Variable::parse(name)
                .map(Column::Variable)
                .or_else(|| Pollutant::parse(name).map(Column::Pollutant)),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered set of columns visible through a [`crate::models::Table`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// The fixed schema of a freshly loaded dataset
    pub fn full() -> Self {
        let mut columns = vec![Column::Station, Column::Timestamp];
        columns.extend(Pollutant::BASE.iter().copied().map(Column::Pollutant));
        columns.extend(Variable::ALL.iter().copied().map(Column::Variable));
        columns.push(Column::Pollutant(Pollutant::AirPollution));
        Self { columns }
    }

    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by name within this schema
    pub fn resolve(&self, name: &str) -> Result<Column> {
        Column::parse(name)
            .filter(|column| self.contains(*column))
            .ok_or_else(|| DashboardError::column_not_found(name))
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_normalization() {
        assert_eq!(normalize_pollutant_name("polusi udara"), "Air Pollution");
        assert_eq!(normalize_pollutant_name("POLUSI UDARA"), "Air Pollution");
        assert_eq!(normalize_pollutant_name("Polusi Udara"), "Air Pollution");
        assert_eq!(normalize_pollutant_name("Air Pollution"), "Air Pollution");
        assert_eq!(normalize_pollutant_name("PM2.5"), "PM2.5");
        assert_eq!(normalize_pollutant_name("polusi"), "polusi");
    }

    #[test]
    fn test_pollutant_parse() {
        assert_eq!(Pollutant::parse("PM2.5"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::parse("pOlUsI uDaRa"), Some(Pollutant::AirPollution));
        assert_eq!(Pollutant::parse("Air Pollution"), Some(Pollutant::AirPollution));
        assert_eq!(Pollutant::parse("pm2.5"), None);
        assert!("Ozone".parse::<Pollutant>().is_err());
    }

    #[test]
    fn test_variable_labels() {
        assert_eq!(Variable::Temperature.label(), "Suhu");
        assert_eq!(Variable::WindDirection.kind(), ColumnKind::Categorical);
        assert_eq!("WSPM".parse::<Variable>().unwrap(), Variable::WindSpeed);
    }

    #[test]
    fn test_full_schema() {
        let schema = Schema::full();
        assert_eq!(schema.len(), 15);
        assert_eq!(schema.columns()[0], Column::Station);
        assert_eq!(
            schema.resolve("polusi udara").unwrap(),
            Column::Pollutant(Pollutant::AirPollution)
        );
        assert!(matches!(
            schema.resolve("NoSuchCol"),
            Err(DashboardError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_projected_schema_resolution() {
        let schema = Schema::from_columns(vec![Column::Station, Column::Pollutant(Pollutant::Co)]);
        assert!(schema.resolve("CO").is_ok());
        assert!(schema.resolve("TEMP").is_err());
    }
}
