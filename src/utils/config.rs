use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DashboardError, Result};
use crate::models::{Pollutant, Variable};
use crate::utils::constants::{
    DEFAULT_DATA_PATH, DEFAULT_DELIMITER, DEFAULT_PROGRESS_INTERVAL, ENV_PREFIX,
};

/// Settings shared by every dashboard interaction
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,

    pub delimiter: char,

    /// Fail the load on physically implausible records instead of warning
    pub strict_validation: bool,

    #[validate(range(min = 1))]
    pub progress_interval: usize,

    #[validate(length(min = 1))]
    pub default_variables: Vec<String>,

    #[validate(length(min = 1))]
    pub default_pollutants: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            delimiter: DEFAULT_DELIMITER,
            strict_validation: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            default_variables: Variable::ALL
                .iter()
                .map(|v| v.column_name().to_string())
                .collect(),
            default_pollutants: Pollutant::BASE
                .iter()
                .map(|p| p.column_name().to_string())
                .collect(),
        }
    }
}

impl DashboardConfig {
    /// Layer an optional config file and `AIRQ_*` environment variables over the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(DashboardError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(env)
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Field validation plus the checks `validator` cannot express
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if !self.delimiter.is_ascii() {
            return Err(DashboardError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }

        if let Some(name) = self
            .default_variables
            .iter()
            .find(|name| Variable::parse(name).is_none())
        {
            return Err(DashboardError::Config(format!(
                "Unknown default variable: '{}'",
                name
            )));
        }

        if let Some(name) = self
            .default_pollutants
            .iter()
            .find(|name| Pollutant::parse(name).is_none())
        {
            return Err(DashboardError::Config(format!(
                "Unknown default pollutant: '{}'",
                name
            )));
        }

        Ok(())
    }
}

/// `AIRQ_*` variables; the selection defaults take comma-separated lists
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("default_pollutants")
        .with_list_parse_key("default_variables")
}
