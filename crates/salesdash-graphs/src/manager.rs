//! Renders the enabled dashboard charts into the output directory.

use crate::{
    DailySalesAggregator, DataAggregator, GraphConfig, GraphKind, GraphRenderer, HeatmapAggregator,
    PurchaseFrequencyAggregator, PurchaseFrequencyGraph, RegionalAggregator, RegionalPerformanceGraph,
    SalesHeatmapGraph, SalesTrendGraph, SegmentAggregator, SegmentDistributionGraph,
    TopProductsAggregator, TopProductsGraph,
};
use futures::future::join_all;
use salesdash_common::{Result, SalesDashError, SalesRow};
use salesdash_config::{Config, GraphsConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// A chart written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGraph {
    /// Which chart was rendered.
    pub kind: GraphKind,
    /// Output file.
    pub path: PathBuf,
    /// Time spent aggregating and rendering.
    pub elapsed: Duration,
}

/// Aggregates rows and renders charts with shared settings.
#[derive(Debug, Clone)]
pub struct GraphManager {
    settings: GraphsConfig,
    output_dir: PathBuf,
    top_n: usize,
    frequency_buckets: usize,
}

impl GraphManager {
    /// Creates a manager writing into `output_dir`.
    pub fn new(settings: GraphsConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            output_dir: output_dir.into(),
            top_n: 10,
            frequency_buckets: 10,
        }
    }

    /// Creates a manager from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.graphs.clone(), &config.dashboard.output_dir)
            .with_top_n(config.dashboard.top_n)
            .with_frequency_buckets(config.dashboard.frequency_buckets)
    }

    /// Sets the number of products in the top products chart.
    #[must_use]
    pub const fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets the number of buckets in the purchase frequency chart.
    #[must_use]
    pub const fn with_frequency_buckets(mut self, buckets: usize) -> Self {
        self.frequency_buckets = buckets;
        self
    }

    /// Directory charts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The charts switched on in the settings, in dashboard order.
    pub fn enabled_kinds(&self) -> Vec<GraphKind> {
        GraphKind::ALL
            .into_iter()
            .filter(|kind| kind.is_enabled(&self.settings.enabled))
            .collect()
    }

    /// Output path of a chart.
    pub fn output_path(&self, kind: GraphKind) -> PathBuf {
        self.output_dir.join(kind.file_name(self.settings.format))
    }

    /// Renders one chart synchronously.
    ///
    /// Returns `None` without writing a file when the rows leave nothing to
    /// draw.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn generate(&self, kind: GraphKind, rows: &[SalesRow]) -> Result<Option<GeneratedGraph>> {
        let started = Instant::now();
        let path = self.output_path(kind);
        let settings = &self.settings;

        let rendered = match kind {
            GraphKind::SalesTrend => render(
                &SalesTrendGraph,
                &DailySalesAggregator.aggregate(rows),
                &SalesTrendGraph::config(settings),
                &path,
            ),
            GraphKind::TopProducts => {
                let graph = TopProductsGraph::new(self.top_n);
                render(
                    &graph,
                    &TopProductsAggregator::new(self.top_n).aggregate(rows),
                    &graph.config(settings),
                    &path,
                )
            }
            GraphKind::RegionalPerformance => render(
                &RegionalPerformanceGraph,
                &RegionalAggregator.aggregate(rows),
                &RegionalPerformanceGraph::config(settings),
                &path,
            ),
            GraphKind::SegmentDistribution => render(
                &SegmentDistributionGraph,
                &SegmentAggregator.aggregate(rows),
                &SegmentDistributionGraph::config(settings),
                &path,
            ),
            GraphKind::PurchaseFrequency => render(
                &PurchaseFrequencyGraph,
                &PurchaseFrequencyAggregator::new(self.frequency_buckets).aggregate(rows),
                &PurchaseFrequencyGraph::config(settings),
                &path,
            ),
            GraphKind::SalesHeatmap => render(
                &SalesHeatmapGraph,
                &HeatmapAggregator.aggregate(rows),
                &SalesHeatmapGraph::config(settings),
                &path,
            ),
        }?;

        if !rendered {
            warn!(graph = %kind, "No data to draw, skipping chart");
            return Ok(None);
        }

        let elapsed = started.elapsed();
        debug!(graph = %kind, elapsed_ms = elapsed.as_millis(), "Chart generated");
        Ok(Some(GeneratedGraph { kind, path, elapsed }))
    }

    /// Renders every enabled chart, each on its own blocking task.
    ///
    /// All charts are attempted; the first failure is returned once every
    /// task has finished.
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub async fn generate_all(&self, rows: Arc<[SalesRow]>) -> Result<Vec<GeneratedGraph>> {
        let started = Instant::now();
        let kinds = self.enabled_kinds();
        info!("Generating {} charts into {}", kinds.len(), self.output_dir.display());

        let tasks = kinds.into_iter().map(|kind| {
            let manager = self.clone();
            let rows = Arc::clone(&rows);
            tokio::task::spawn_blocking(move || manager.generate(kind, &rows))
        });

        let mut generated = Vec::new();
        let mut first_error = None;
        for joined in join_all(tasks).await {
            let outcome = joined
                .map_err(|e| SalesDashError::graph_with_source("Chart rendering task failed", e))
                .and_then(|result| result);
            match outcome {
                Ok(Some(graph)) => generated.push(graph),
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, "Chart generation failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        info!(
            "Generated {} charts in {} ms",
            generated.len(),
            started.elapsed().as_millis()
        );
        Ok(generated)
    }
}

/// Renders `data` unless the graph has nothing to draw.
fn render<R: GraphRenderer>(graph: &R, data: &R::Data, config: &GraphConfig, path: &Path) -> Result<bool> {
    if !graph.has_data(data) {
        return Ok(false);
    }
    graph.render_to_file(data, config, path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_config::ChartFormat;

    #[test]
    fn test_output_paths_follow_format() {
        let mut settings = GraphsConfig::default();
        settings.format = ChartFormat::Svg;
        let manager = GraphManager::new(settings, "out");
        assert_eq!(
            manager.output_path(GraphKind::SalesTrend),
            PathBuf::from("out/sales_trend.svg")
        );
    }

    #[test]
    fn test_enabled_kinds_respect_flags() {
        let mut settings = GraphsConfig::default();
        settings.enabled.sales_heatmap = false;
        settings.enabled.top_products = false;
        let manager = GraphManager::new(settings, "out");

        assert_eq!(
            manager.enabled_kinds(),
            vec![
                GraphKind::SalesTrend,
                GraphKind::RegionalPerformance,
                GraphKind::SegmentDistribution,
                GraphKind::PurchaseFrequency,
            ]
        );
    }

    #[test]
    fn test_empty_rows_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = GraphManager::new(GraphsConfig::default(), dir.path());

        for kind in GraphKind::ALL {
            assert_eq!(manager.generate(kind, &[]).unwrap(), None);
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_from_config_uses_dashboard_settings() {
        let mut config = Config::default();
        config.dashboard.output_dir = PathBuf::from("charts");
        config.dashboard.top_n = 3;
        let manager = GraphManager::from_config(&config);
        assert_eq!(manager.output_dir(), Path::new("charts"));
        assert_eq!(manager.top_n, 3);
    }
}
