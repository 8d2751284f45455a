pub mod dataset_analyzer;

pub use dataset_analyzer::{ColumnCoverage, DatasetAnalyzer, DatasetStatistics};
