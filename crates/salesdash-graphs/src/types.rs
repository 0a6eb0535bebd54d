//! Graph types and data structures

use crate::palette::parse_hex;
use chrono::NaiveDate;
use plotters::style::RGBColor;
use salesdash_config::{ChartFormat, EnabledGraphsConfig, GraphsConfig, StylingConfig};
use serde::Serialize;
use std::fmt;

/// The charts of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    /// Daily sales and profit lines.
    SalesTrend,
    /// Top products by sales.
    TopProducts,
    /// Sales by region.
    RegionalPerformance,
    /// Sales share by customer segment.
    SegmentDistribution,
    /// Customers by number of orders.
    PurchaseFrequency,
    /// Region by category sales matrix.
    SalesHeatmap,
}

impl GraphKind {
    /// Every chart in dashboard order.
    pub const ALL: [Self; 6] = [
        Self::SalesTrend,
        Self::TopProducts,
        Self::RegionalPerformance,
        Self::SegmentDistribution,
        Self::PurchaseFrequency,
        Self::SalesHeatmap,
    ];

    /// Output file name without extension.
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::SalesTrend => "sales_trend",
            Self::TopProducts => "top_products",
            Self::RegionalPerformance => "regional_performance",
            Self::SegmentDistribution => "segment_distribution",
            Self::PurchaseFrequency => "purchase_frequency",
            Self::SalesHeatmap => "sales_heatmap",
        }
    }

    /// Whether the chart is switched on.
    pub const fn is_enabled(self, enabled: &EnabledGraphsConfig) -> bool {
        match self {
            Self::SalesTrend => enabled.sales_trend,
            Self::TopProducts => enabled.top_products,
            Self::RegionalPerformance => enabled.regional_performance,
            Self::SegmentDistribution => enabled.segment_distribution,
            Self::PurchaseFrequency => enabled.purchase_frequency,
            Self::SalesHeatmap => enabled.sales_heatmap,
        }
    }

    /// Output file name for a format, e.g. `sales_trend.png`.
    pub fn file_name(self, format: ChartFormat) -> String {
        format!("{}.{}", self.file_stem(), format.extension())
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl std::str::FromStr for GraphKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.file_stem() == s.trim())
            .ok_or_else(|| format!("unknown graph '{s}'"))
    }
}

/// Graph configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    /// Chart title.
    pub title: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Output image format.
    pub format: ChartFormat,
    /// Horizontal axis description.
    pub x_label: Option<String>,
    /// Vertical axis description.
    pub y_label: Option<String>,
    /// Fonts and colors.
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            width: 1200,
            height: 600,
            format: ChartFormat::Png,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Builds a chart configuration from the `graphs` settings.
    pub fn from_settings(title: impl Into<String>, settings: &GraphsConfig) -> Self {
        Self {
            title: title.into(),
            width: settings.width,
            height: settings.height,
            format: settings.format,
            x_label: None,
            y_label: None,
            style: StyleConfig::from_styling(&settings.styling),
        }
    }

    /// Sets both axis descriptions.
    #[must_use]
    pub fn with_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = Some(x_label.to_string());
        self.y_label = Some(y_label.to_string());
        self
    }

    /// Horizontal axis description or empty.
    pub fn x_desc(&self) -> &str {
        self.x_label.as_deref().unwrap_or("")
    }

    /// Vertical axis description or empty.
    pub fn y_desc(&self) -> &str {
        self.y_label.as_deref().unwrap_or("")
    }
}

/// Fonts, colors and grid settings shared by all charts.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Font family for every text element.
    pub font_family: String,
    /// Title size in points.
    pub title_font_size: u32,
    /// Axis and annotation size in points.
    pub label_font_size: u32,
    /// Whether to draw grid lines.
    pub enable_grid: bool,
    /// Sales series color.
    pub sales_color: RGBColor,
    /// Profit series color.
    pub profit_color: RGBColor,
    /// Background fill.
    pub background_color: RGBColor,
    /// Text color.
    pub text_color: RGBColor,
    /// Margin around the plot in pixels.
    pub margin: i32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::from_styling(&StylingConfig::default())
    }
}

impl StyleConfig {
    /// Resolves the configured hex colors.
    pub fn from_styling(styling: &StylingConfig) -> Self {
        Self {
            font_family: styling.font_family.clone(),
            title_font_size: styling.title_font_size,
            label_font_size: styling.label_font_size,
            enable_grid: styling.enable_grid,
            sales_color: parse_hex(&styling.colors.sales).unwrap_or(RGBColor(31, 119, 180)),
            profit_color: parse_hex(&styling.colors.profit).unwrap_or(RGBColor(44, 160, 44)),
            background_color: parse_hex(&styling.colors.background).unwrap_or(RGBColor(255, 255, 255)),
            text_color: parse_hex(&styling.colors.text).unwrap_or(RGBColor(38, 39, 48)),
            margin: 20,
        }
    }

    /// Font spec for titles.
    pub fn title_font(&self) -> (&str, f64) {
        (self.font_family.as_str(), f64::from(self.title_font_size))
    }

    /// Font spec for axis labels and annotations.
    pub fn label_font(&self) -> (&str, f64) {
        (self.font_family.as_str(), f64::from(self.label_font_size))
    }
}

/// Totals of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Sum of sales.
    pub sales: f64,
    /// Sum of profit.
    pub profit: f64,
    /// Sum of quantities.
    pub quantity: u64,
}

/// Totals of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotals {
    /// Product name.
    pub product: String,
    /// Sum of sales.
    pub sales: f64,
    /// Sum of quantities.
    pub quantity: u64,
    /// Sum of profit.
    pub profit: f64,
}

/// Totals of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotals {
    /// Region name.
    pub region: String,
    /// Sum of sales.
    pub sales: f64,
    /// Sum of profit.
    pub profit: f64,
    /// Sum of quantities.
    pub quantity: u64,
    /// Distinct customers.
    pub customers: usize,
}

/// Totals of one customer segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTotals {
    /// Segment name.
    pub segment: String,
    /// Sum of sales.
    pub sales: f64,
    /// Distinct customers.
    pub customers: usize,
    /// Sum of quantities.
    pub quantity: u64,
    /// Sales per distinct customer.
    pub average_order_value: f64,
    /// Fraction of all sales, 0 to 1.
    pub share: f64,
}

/// Number of customers that placed a given number of orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyBucket {
    /// Orders per customer.
    pub order_count: usize,
    /// Customers with exactly that many orders.
    pub customer_count: usize,
}

/// Sales summed per region and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapMatrix {
    /// Sorted region names, one per row.
    pub regions: Vec<String>,
    /// Sorted category names, one per column.
    pub categories: Vec<String>,
    /// `values[row][column]`, 0 where no sales exist.
    pub values: Vec<Vec<f64>>,
}

impl HeatmapMatrix {
    /// Value of a cell.
    pub fn get(&self, region: usize, category: usize) -> Option<f64> {
        self.values.get(region)?.get(category).copied()
    }

    /// Smallest and largest cell values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut cells = self.values.iter().flatten().copied();
        let first = cells.next()?;
        Some(cells.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Whether the matrix has no cells.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() || self.categories.is_empty()
    }
}
