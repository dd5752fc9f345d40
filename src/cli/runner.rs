use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dataprep::{DatasetConfig, resize_directory, split_directory};

use super::args::{CliArgs, Command};
use super::errors::AppError;

#[derive(Serialize)]
struct RunSummary<'a, T: Serialize> {
    pipeline: &'a str,
    finished_at: DateTime<Utc>,
    report: &'a T,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn write_report<T: Serialize>(path: &Path, pipeline: &str, report: &T) -> Result<(), AppError> {
    let summary = RunSummary {
        pipeline,
        finished_at: Utc::now(),
        report,
    };
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(path, json).map_err(|source| AppError::Report {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Report written to {:?}", path);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<DatasetConfig, AppError> {
    match path {
        Some(path) => {
            info!("Loading config from {:?}", path);
            DatasetConfig::load(path).map_err(|source| AppError::Config {
                path: path.to_path_buf(),
                source,
            })
        }
        None => Ok(DatasetConfig::default()),
    }
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_logging(args.verbose);

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Resize(resize_args) => {
            let params = resize_args.apply(config.resize);
            let report = resize_directory(&params)?;
            if let Some(path) = &args.report {
                write_report(path, "resize", &report)?;
            }
        }
        Command::Split(split_args) => {
            let params = split_args.apply(config.split);
            let report = split_directory(&params)?;
            if let Some(path) = &args.report {
                write_report(path, "split", &report)?;
            }
        }
    }

    Ok(())
}
