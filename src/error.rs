use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to load dataset {}: {}", .path.display(), .reason)]
    Load { path: PathBuf, reason: String },

    #[error("Column '{column}' not found in table schema")]
    ColumnNotFound { column: String },

    #[error("Empty selection: {reason}")]
    EmptySelection { reason: String },

    #[error("Column '{column}' is not numeric")]
    NonNumericColumn { column: String },

    #[error("Unknown label: '{label}'")]
    UnknownLabel { label: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DashboardError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn column_not_found(column: impl Into<String>) -> Self {
        DashboardError::ColumnNotFound {
            column: column.into(),
        }
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        DashboardError::Config(err.to_string())
    }
}
