//! Runtime validation of loaded configuration values.

use crate::schema::Config;
use regex::Regex;
use salesdash_common::{Result, SalesDashError};
use std::sync::LazyLock;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Smallest accepted chart edge in pixels.
pub const MIN_CHART_SIZE: u32 = 200;
/// Largest accepted chart edge in pixels.
pub const MAX_CHART_SIZE: u32 = 4000;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        match Self::violations(config).into_iter().next() {
            Some((field, message)) => Err(SalesDashError::validation_field(message, field)),
            None => Ok(()),
        }
    }

    /// Lists every `(field, message)` problem in the configuration.
    pub fn violations(config: &Config) -> Vec<(&'static str, String)> {
        let mut problems = Vec::new();
        let mut check = |ok: bool, field: &'static str, message: String| {
            if !ok {
                problems.push((field, message));
            }
        };

        let graphs = &config.graphs;
        check(
            (MIN_CHART_SIZE..=MAX_CHART_SIZE).contains(&graphs.width),
            "graphs.width",
            format!("width must be between {MIN_CHART_SIZE} and {MAX_CHART_SIZE} pixels"),
        );
        check(
            (MIN_CHART_SIZE..=MAX_CHART_SIZE).contains(&graphs.height),
            "graphs.height",
            format!("height must be between {MIN_CHART_SIZE} and {MAX_CHART_SIZE} pixels"),
        );
        check(
            (8..=72).contains(&graphs.styling.title_font_size),
            "graphs.styling.title_font_size",
            "title font size must be between 8 and 72".to_string(),
        );
        check(
            (6..=48).contains(&graphs.styling.label_font_size),
            "graphs.styling.label_font_size",
            "label font size must be between 6 and 48".to_string(),
        );
        check(
            !graphs.styling.font_family.trim().is_empty(),
            "graphs.styling.font_family",
            "font family cannot be empty".to_string(),
        );

        let colors = &graphs.styling.colors;
        for (field, value) in [
            ("graphs.styling.colors.sales", &colors.sales),
            ("graphs.styling.colors.profit", &colors.profit),
            ("graphs.styling.colors.background", &colors.background),
            ("graphs.styling.colors.text", &colors.text),
        ] {
            check(
                HEX_COLOR_REGEX.is_match(value),
                field,
                format!("'{value}' is not a #RRGGBB color"),
            );
        }

        let dashboard = &config.dashboard;
        check(
            (1..=50).contains(&dashboard.top_n),
            "dashboard.top_n",
            "top_n must be between 1 and 50".to_string(),
        );
        check(
            (1..=100).contains(&dashboard.frequency_buckets),
            "dashboard.frequency_buckets",
            "frequency_buckets must be between 1 and 100".to_string(),
        );
        check(
            dashboard.preview_limit >= 1,
            "dashboard.preview_limit",
            "preview_limit must be at least 1".to_string(),
        );
        check(
            (0.0..=100.0).contains(&dashboard.healthy_margin_percent),
            "dashboard.healthy_margin_percent",
            "healthy_margin_percent must be between 0 and 100".to_string(),
        );

        let generator = &config.generator;
        check(
            (1..=1_000_000).contains(&generator.records),
            "generator.records",
            "records must be between 1 and 1000000".to_string(),
        );
        check(
            generator.customers >= 1,
            "generator.customers",
            "customers must be at least 1".to_string(),
        );
        check(generator.days >= 1, "generator.days", "days must be at least 1".to_string());

        check(
            !config.data.path.as_os_str().is_empty(),
            "data.path",
            "data path cannot be empty".to_string(),
        );
        check(
            !config.logging.level.trim().is_empty(),
            "logging.level",
            "log level cannot be empty".to_string(),
        );

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::SalesDashError;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#1f77b4"));
        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
        assert!(ConfigValidator::violations(&Config::default()).is_empty());
    }

    #[test]
    fn test_invalid_color_reports_field() {
        let mut config = Config::default();
        config.graphs.styling.colors.profit = "green".to_string();

        match ConfigValidator::validate(&config) {
            Err(SalesDashError::Validation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("graphs.styling.colors.profit"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_collects_all_violations() {
        let mut config = Config::default();
        config.graphs.width = 50;
        config.dashboard.top_n = 0;
        config.generator.records = 0;

        let fields: Vec<_> = ConfigValidator::violations(&config).into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["graphs.width", "dashboard.top_n", "generator.records"]);
    }
}
