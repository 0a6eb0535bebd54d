//! `salesdash dashboard`: the full report for a filtered dataset.

use crate::report::{footer, kpi_panel, preview_table, HEADER, NO_DATA_MESSAGE};
use crate::{AppContext, CommandResult, FilterArgs};
use anyhow::Context as _;
use chrono::Local;
use clap::Args;
use salesdash_common::format_count;
use salesdash_data::{filtered_export_name, write_csv, KpiSummary, SalesDataset};
use salesdash_graphs::GraphManager;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Flags of the `dashboard` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Directory for charts and exports; defaults to the configured one
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of products in the top products chart (1 to 50)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=50))]
    pub top_n: Option<u8>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Write the filtered rows to a timestamped CSV in the output directory
    #[arg(long)]
    pub export: bool,

    /// Print the first N filtered rows (capped at the configured preview limit)
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,
}

impl DashboardArgs {
    fn output_dir(&self, ctx: &AppContext) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| ctx.config.dashboard.output_dir.clone())
    }
}

/// Loads, filters and reports on the configured dataset.
#[instrument(skip_all)]
pub async fn run<W: Write>(ctx: &AppContext, args: &DashboardArgs, out: &mut W) -> CommandResult {
    let dataset = ctx.load(&ctx.data_path(None))?;
    let selection = args.filters.selection(&dataset).context("Invalid filter selection")?;
    let filtered = selection.apply(&dataset);
    info!(filters = %selection, rows = filtered.len(), "Applied filters");

    writeln!(out, "{HEADER}\n")?;
    if filtered.is_empty() {
        writeln!(out, "{NO_DATA_MESSAGE}")?;
        return Ok(());
    }

    let kpi = KpiSummary::compute(filtered.rows(), ctx.config.dashboard.healthy_margin_percent);
    write!(out, "{}", kpi_panel(&kpi))?;

    let output_dir = args.output_dir(ctx);
    if !args.no_charts {
        render_charts(ctx, args, &output_dir, &filtered, out).await?;
    }

    if let Some(requested) = args.preview {
        let limit = requested.min(ctx.config.dashboard.preview_limit);
        writeln!(
            out,
            "\nRaw Data (first {} of {} rows)",
            format_count(limit.min(filtered.len()) as u64),
            format_count(filtered.len() as u64)
        )?;
        write!(out, "{}", preview_table(filtered.rows(), limit))?;
    }

    if args.export {
        let path = output_dir.join(filtered_export_name(Local::now().naive_local()));
        let written = write_csv(&path, filtered.records())
            .with_context(|| format!("Failed to export filtered data to {}", path.display()))?;
        writeln!(out, "\nExported {} rows to {}", format_count(written as u64), path.display())?;
    }

    writeln!(out, "\n{}", footer(&kpi))?;
    Ok(())
}

async fn render_charts<W: Write>(
    ctx: &AppContext,
    args: &DashboardArgs,
    output_dir: &Path,
    filtered: &SalesDataset,
    out: &mut W,
) -> CommandResult {
    let config = &ctx.config;
    let manager = GraphManager::new(config.graphs.clone(), output_dir)
        .with_top_n(args.top_n.map_or(config.dashboard.top_n, usize::from))
        .with_frequency_buckets(config.dashboard.frequency_buckets);

    let generated = manager
        .generate_all(Arc::from(filtered.rows()))
        .await
        .context("Failed to render charts")?;

    writeln!(out, "\nCharts")?;
    for graph in generated {
        writeln!(
            out,
            "  {:<22}{} ({} ms)",
            graph.kind.to_string(),
            graph.path.display(),
            graph.elapsed.as_millis()
        )?;
    }
    Ok(())
}
