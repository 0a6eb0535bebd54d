//! `salesdash generate`: writes a synthetic sales dataset.

use crate::report::preview_table;
use crate::{AppContext, CommandResult};
use anyhow::Context as _;
use chrono::NaiveDate;
use clap::Args;
use salesdash_common::{SalesRow, DATE_FORMAT};
use salesdash_data::{write_csv, GeneratorSettings, SalesGenerator};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Rows shown after generation.
const PREVIEW_ROWS: usize = 5;

/// Flags of the `generate` command; unset values come from the configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Number of records to generate
    #[arg(long)]
    pub records: Option<usize>,

    /// Size of the customer pool
    #[arg(long)]
    pub customers: Option<usize>,

    /// Length of the date window in days
    #[arg(long)]
    pub days: Option<u32>,

    /// Last day of the date window (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output CSV path; defaults to the configured data path
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    /// Merges the flags over the configured generator settings.
    pub fn settings(&self, ctx: &AppContext) -> GeneratorSettings {
        let configured = &ctx.config.generator;
        let defaults = GeneratorSettings::default();
        GeneratorSettings {
            records: self.records.unwrap_or(configured.records),
            customers: self.customers.unwrap_or(configured.customers),
            days: self.days.unwrap_or(configured.days),
            end_date: self.end_date.unwrap_or(defaults.end_date),
            seed: self.seed.or(configured.seed),
        }
    }
}

/// Generates the dataset, writes it and prints a short report.
pub fn run<W: Write>(ctx: &AppContext, args: &GenerateArgs, out: &mut W) -> CommandResult {
    let settings = args.settings(ctx);
    let path = ctx.data_path(args.output.as_deref());
    info!(records = settings.records, seed = ?settings.seed, "Generating sample sales data");

    let records = SalesGenerator::new(settings)
        .context("Invalid generator settings")?
        .generate();
    write_csv(&path, &records).with_context(|| format!("Failed to write {}", path.display()))?;

    writeln!(out, "Sample data generated successfully!")?;
    writeln!(out, "File saved: {}", path.display())?;
    writeln!(out, "Records generated: {}", records.len())?;
    if let (Some(first), Some(last)) = (records.first(), records.last()) {
        writeln!(
            out,
            "Date range: {} to {}",
            first.date.format(DATE_FORMAT),
            last.date.format(DATE_FORMAT)
        )?;
    }

    let preview: Vec<SalesRow> = records.iter().take(PREVIEW_ROWS).cloned().map(SalesRow::new).collect();
    writeln!(out, "\nDataset preview:")?;
    write!(out, "{}", preview_table(&preview, PREVIEW_ROWS))?;
    Ok(())
}
