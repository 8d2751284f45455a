pub mod dataset_reader;

pub use dataset_reader::{load, parse_timestamp, DatasetReader};
