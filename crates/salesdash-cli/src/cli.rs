//! Command line definition.

use clap::{Parser, Subcommand};
use salesdash_commands::{DashboardArgs, GenerateArgs, OptionsArgs, SummaryArgs};
use salesdash_common::logging::LogFormat;
use salesdash_config::Config;
use std::path::PathBuf;

/// Sales analytics dashboard: KPIs, charts and exports from a sales CSV.
#[derive(Debug, Parser)]
#[command(name = "salesdash", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (.yaml, .yml or .toml)
    #[arg(long, short, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sales CSV file, overriding the configured path
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Log level filter, e.g. "debug" or "salesdash_data=trace"
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log output style: pretty, compact or json
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// The subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a synthetic sales dataset
    Generate(GenerateArgs),
    /// Print the dashboard for the filtered data and render its charts
    Dashboard(DashboardArgs),
    /// Print only the key performance indicators
    Summary(SummaryArgs),
    /// List the available filter choices
    Options(OptionsArgs),
    /// Print the effective configuration as YAML
    Config,
}

impl Cli {
    /// Applies the global flags on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.data {
            config.data.path.clone_from(path);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}
