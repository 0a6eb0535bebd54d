//! `salesdash summary`: the KPI panel alone, as text or JSON.

use crate::report::{footer, kpi_panel, NO_DATA_MESSAGE};
use crate::{AppContext, CommandResult, FilterArgs};
use anyhow::Context as _;
use clap::Args;
use salesdash_data::KpiSummary;
use std::io::Write;

/// Flags of the `summary` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print the KPIs as JSON
    #[arg(long)]
    pub json: bool,
}

/// Prints the KPIs of the filtered dataset.
///
/// JSON output is produced even for an empty selection so scripts always
/// receive an object.
pub fn run<W: Write>(ctx: &AppContext, args: &SummaryArgs, out: &mut W) -> CommandResult {
    let dataset = ctx.load(&ctx.data_path(None))?;
    let selection = args.filters.selection(&dataset).context("Invalid filter selection")?;
    let filtered = selection.apply(&dataset);
    let kpi = KpiSummary::compute(filtered.rows(), ctx.config.dashboard.healthy_margin_percent);

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &kpi).context("Failed to serialize KPIs")?;
        writeln!(out)?;
    } else if filtered.is_empty() {
        writeln!(out, "{NO_DATA_MESSAGE}")?;
    } else {
        write!(out, "{}", kpi_panel(&kpi))?;
        writeln!(out, "\n{}", footer(&kpi))?;
    }
    Ok(())
}
