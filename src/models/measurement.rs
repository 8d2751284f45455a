use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::models::schema::{Column, Pollutant, Variable};
use crate::utils::constants::WIND_DIRECTIONS;

/// One row of the source dataset: a station, a timestamp and its readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MeasurementRecord {
    #[validate(length(min = 1))]
    pub station: String,
    pub timestamp: NaiveDateTime,

    // Environmental variables
    pub temp: Option<f64>,
    pub pres: Option<f64>,
    pub dewp: Option<f64>,

    #[validate(range(min = 0.0))]
    pub rain: Option<f64>,

    pub wd: Option<String>,

    #[validate(range(min = 0.0))]
    pub wspm: Option<f64>,

    // Pollutant concentrations
    #[validate(range(min = 0.0))]
    pub pm25: Option<f64>,

    #[validate(range(min = 0.0))]
    pub pm10: Option<f64>,

    #[validate(range(min = 0.0))]
    pub so2: Option<f64>,

    #[validate(range(min = 0.0))]
    pub no2: Option<f64>,

    #[validate(range(min = 0.0))]
    pub co: Option<f64>,

    #[validate(range(min = 0.0))]
    pub o3: Option<f64>,

    #[validate(range(min = 0.0))]
    pub air_pollution: Option<f64>,
}

impl MeasurementRecord {
    /// A record with no readings, to be filled through [`MeasurementRecord::set_numeric`]
    pub fn empty(station: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            station: station.into(),
            timestamp,
            temp: None,
            pres: None,
            dewp: None,
            rain: None,
            wd: None,
            wspm: None,
            pm25: None,
            pm10: None,
            so2: None,
            no2: None,
            co: None,
            o3: None,
            air_pollution: None,
        }
    }

    pub fn with_pollutant(mut self, pollutant: Pollutant, value: f64) -> Self {
        *self.pollutant_slot(pollutant) = Some(value);
        self
    }

    pub fn with_variable(mut self, variable: Variable, value: f64) -> Self {
        if let Some(slot) = self.variable_slot(variable) {
            *slot = Some(value);
        }
        self
    }

    pub fn with_wind_direction(mut self, wd: impl Into<String>) -> Self {
        self.wd = Some(wd.into());
        self
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Numeric reading for a column; `None` when missing or not numeric
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Pollutant(p) => match p {
                Pollutant::Pm25 => self.pm25,
                Pollutant::Pm10 => self.pm10,
                Pollutant::So2 => self.so2,
                Pollutant::No2 => self.no2,
                Pollutant::Co => self.co,
                Pollutant::O3 => self.o3,
                Pollutant::AirPollution => self.air_pollution,
            },
            Column::Variable(v) => match v {
                Variable::Temperature => self.temp,
                Variable::Pressure => self.pres,
                Variable::DewPoint => self.dewp,
                Variable::Rain => self.rain,
                Variable::WindSpeed => self.wspm,
                Variable::WindDirection => None,
            },
            Column::Station | Column::Timestamp => None,
        }
    }

    /// Text value for a categorical column
    pub fn category(&self, column: Column) -> Option<&str> {
        match column {
            Column::Station => Some(self.station.as_str()),
            Column::Variable(Variable::WindDirection) => self.wd.as_deref(),
            _ => None,
        }
    }

    /// Store a numeric reading; ignored for non-numeric columns
    pub fn set_numeric(&mut self, column: Column, value: Option<f64>) {
        match column {
            Column::Pollutant(p) => *self.pollutant_slot(p) = value,
            Column::Variable(v) => {
                if let Some(slot) = self.variable_slot(v) {
                    *slot = value;
                }
            }
            Column::Station | Column::Timestamp => {}
        }
    }

    fn pollutant_slot(&mut self, pollutant: Pollutant) -> &mut Option<f64> {
        match pollutant {
            Pollutant::Pm25 => &mut self.pm25,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::So2 => &mut self.so2,
            Pollutant::No2 => &mut self.no2,
            Pollutant::Co => &mut self.co,
            Pollutant::O3 => &mut self.o3,
            Pollutant::AirPollution => &mut self.air_pollution,
        }
    }

    fn variable_slot(&mut self, variable: Variable) -> Option<&mut Option<f64>> {
        match variable {
            Variable::Temperature => Some(&mut self.temp),
            Variable::Pressure => Some(&mut self.pres),
            Variable::DewPoint => Some(&mut self.dewp),
            Variable::Rain => Some(&mut self.rain),
            Variable::WindSpeed => Some(&mut self.wspm),
            Variable::WindDirection => None,
        }
    }

    /// Physical plausibility: non-negative amounts and a known wind direction code
    pub fn validate_physical(&self) -> Result<()> {
        self.validate()?;

        if let Some(wd) = &self.wd {
            if !WIND_DIRECTIONS.contains(&wd.as_str()) {
                let mut errors = validator::ValidationErrors::new();
                let mut error = validator::ValidationError::new("wind_direction");
                error.message = Some(format!("Unknown wind direction '{}'", wd).into());
                errors.add("wd", error);
                return Err(errors.into());
            }
        }

        Ok(())
    }
}
