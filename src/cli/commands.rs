use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{info, Level};

use crate::analyzers::DatasetAnalyzer;
use crate::charts::ChartSpec;
use crate::cli::args::{Cli, Commands};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::utils::config::DashboardConfig;
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config = config.with_data_path(data);
    }

    let progress = ProgressReporter::new_spinner(
        &format!("Loading {}...", config.data_path.display()),
        cli.quiet,
    );
    let dashboard = Dashboard::open(config, Some(&progress))?;
    progress.finish_with_message(&format!("Loaded {} records", dashboard.table().len()));

    match cli.command {
        Commands::Yearly { pollutant, output } => {
            let chart = dashboard.yearly_variation(&pollutant)?;
            emit_chart(&chart, output)?;
        }

        Commands::Scatter {
            station,
            variable,
            pollutant,
            output,
        } => {
            let chart = dashboard.scatter(&station, &variable, &pollutant)?;
            emit_chart(&chart, output)?;
        }

        Commands::Heatmap {
            variables,
            pollutants,
            output,
        } => {
            let chart = dashboard.heatmap(&variables, &pollutants)?;
            emit_chart(&chart, output)?;
        }

        Commands::Stations => {
            for station in dashboard.stations() {
                println!("{}", station);
            }
        }

        Commands::Info { json } => {
            let stats = DatasetAnalyzer::new().analyze(dashboard.table())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Dataset: {}", dashboard.config().data_path.display());
                println!("{}", stats.detailed_summary());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // A second initialisation (e.g. from tests) keeps the existing subscriber
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }

    Ok(())
}

/// Chart specs go to stdout as JSON unless an output file is given
fn emit_chart(chart: &ChartSpec, output: Option<PathBuf>) -> Result<()> {
    let json = chart.to_json_pretty()?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)?;
            info!(path = %path.display(), title = chart.title(), "Wrote chart spec");
        }
        None => println!("{}", json),
    }

    Ok(())
}
