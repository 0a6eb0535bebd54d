//! Configuration schema definitions.
//!
//! Every section carries `#[serde(default)]` so a configuration file only
//! needs to spell out the values it changes.

use salesdash_common::logging::{LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the sales dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset location.
    pub data: DataConfig,
    /// Synthetic data generator settings.
    pub generator: GeneratorConfig,
    /// Dashboard report settings.
    pub dashboard: DashboardConfig,
    /// Chart rendering settings.
    pub graphs: GraphsConfig,
    /// Logging settings.
    pub logging: LoggingSection,
}

/// Dataset location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the sales CSV file.
    pub path: PathBuf,
}

/// Synthetic data generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of records to generate.
    pub records: usize,
    /// Size of the customer pool.
    pub customers: usize,
    /// Length of the date window in days, ending today.
    pub days: u32,
    /// Seed for reproducible output.
    pub seed: Option<u64>,
}

/// Dashboard report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory charts and exports are written to.
    pub output_dir: PathBuf,
    /// Number of products in the top products chart.
    pub top_n: usize,
    /// Number of order-count buckets in the purchase frequency chart.
    pub frequency_buckets: usize,
    /// Maximum number of rows the raw data preview may print.
    pub preview_limit: usize,
    /// Margin percentage above which profitability counts as healthy.
    pub healthy_margin_percent: f64,
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// Raster PNG.
    #[default]
    Png,
    /// Vector SVG.
    Svg,
}

impl ChartFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl std::str::FromStr for ChartFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unknown chart format '{other}' (expected png or svg)")),
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphsConfig {
    /// Output image format.
    pub format: ChartFormat,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Which charts are rendered.
    pub enabled: EnabledGraphsConfig,
    /// Styling configuration.
    pub styling: StylingConfig,
}

/// Enabled graphs configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledGraphsConfig {
    /// Daily sales and profit trend.
    pub sales_trend: bool,
    /// Top products by sales.
    pub top_products: bool,
    /// Sales by region.
    pub regional_performance: bool,
    /// Sales share by customer segment.
    pub segment_distribution: bool,
    /// Customers by number of orders.
    pub purchase_frequency: bool,
    /// Region by category sales matrix.
    pub sales_heatmap: bool,
}

/// Styling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Whether to draw grid lines.
    pub enable_grid: bool,
    /// Font family used for all text.
    pub font_family: String,
    /// Title font size in points.
    pub title_font_size: u32,
    /// Axis label font size in points.
    pub label_font_size: u32,
    /// Color configuration.
    pub colors: ColorsConfig,
}

/// Color configuration, as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Sales series color.
    pub sales: String,
    /// Profit series color.
    pub profit: String,
    /// Background color.
    pub background: String,
    /// Title and label color.
    pub text: String,
}

/// Logging section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Level filter, e.g. `info` or `salesdash_data=debug`.
    pub level: String,
    /// Console output style.
    pub format: LogFormat,
    /// Optional JSON log file.
    pub file: Option<PathBuf>,
    /// Whether to log span timings.
    pub include_spans: bool,
}

impl LoggingSection {
    /// Converts the section into the settings `init_logging` expects.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file.clone(),
            include_spans: self.include_spans,
            ..LoggingConfig::default()
        }
    }
}

impl EnabledGraphsConfig {
    /// Number of enabled charts.
    pub const fn count(&self) -> usize {
        self.sales_trend as usize
            + self.top_products as usize
            + self.regional_performance as usize
            + self.segment_distribution as usize
            + self.purchase_frequency as usize
            + self.sales_heatmap as usize
    }
}
