//! Default values for every configuration section.

use crate::schema::*;
use salesdash_common::logging::LogFormat;
use std::path::PathBuf;

/// Default dataset path.
pub const DEFAULT_DATA_PATH: &str = "sales_data.csv";
/// Default chart output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "dashboard_output";

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            generator: GeneratorConfig::default(),
            dashboard: DashboardConfig::default(),
            graphs: GraphsConfig::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            records: 5000,
            customers: 1000,
            days: 730,
            seed: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_n: 10,
            frequency_buckets: 10,
            preview_limit: 1000,
            healthy_margin_percent: 20.0,
        }
    }
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            format: ChartFormat::Png,
            width: 1200,
            height: 600,
            enabled: EnabledGraphsConfig::default(),
            styling: StylingConfig::default(),
        }
    }
}

impl Default for EnabledGraphsConfig {
    fn default() -> Self {
        Self {
            sales_trend: true,
            top_products: true,
            regional_performance: true,
            segment_distribution: true,
            purchase_frequency: true,
            sales_heatmap: true,
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            enable_grid: true,
            font_family: "sans-serif".to_string(),
            title_font_size: 24,
            label_font_size: 14,
            colors: ColorsConfig::default(),
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            sales: "#1f77b4".to_string(),
            profit: "#2ca02c".to_string(),
            background: "#ffffff".to_string(),
            text: "#262730".to_string(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
            include_spans: false,
        }
    }
}
