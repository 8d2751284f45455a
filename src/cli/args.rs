use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airq-dashboard")]
#[command(about = "Air-quality dashboard: yearly variation, scatter and correlation chart specs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Dataset CSV file (overrides config)")]
    pub data: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress the progress spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Yearly mean of pollutants per station (line chart)
    Yearly {
        #[arg(short, long, value_delimiter = ',', help = "Pollutant(s), e.g. PM2.5")]
        pollutant: Vec<String>,

        #[arg(short, long, help = "Write the chart spec to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Pollutant level against an environmental variable at one station (scatter plot)
    Scatter {
        #[arg(short, long)]
        station: String,

        #[arg(long, default_value = "TEMP")]
        variable: String,

        #[arg(short, long, default_value = "PM2.5")]
        pollutant: String,

        #[arg(short, long, help = "Write the chart spec to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Correlation heatmap over selected variables and pollutants
    Heatmap {
        #[arg(long, value_delimiter = ',', help = "Variables [default: all]")]
        variables: Vec<String>,

        #[arg(long, value_delimiter = ',', help = "Pollutants [default: all base pollutants]")]
        pollutants: Vec<String>,

        #[arg(short, long, help = "Write the chart spec to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// List the stations present in the dataset
    Stations,

    /// Display summary statistics of the dataset
    Info {
        #[arg(long, help = "Print statistics as JSON")]
        json: bool,
    },
}
