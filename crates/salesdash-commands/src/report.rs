//! Plain-text rendering of the dashboard sections.

use chrono::NaiveDate;
use salesdash_common::{
    format_count, format_currency, format_percent, truncate_string, SalesRow, DATE_FORMAT,
};
use salesdash_data::{Dimension, FilterOptions, KpiSummary, SalesDataset};
use std::fmt::Write as _;

/// Shown instead of the dashboard when the filters leave no rows.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected filters. Please adjust your selection.";

/// Dashboard heading.
pub const HEADER: &str = "Sales Analytics Dashboard";

/// The five KPI lines: label, value and the value's annotation.
pub fn kpi_lines(kpi: &KpiSummary) -> [(&'static str, String, String); 5] {
    [
        (
            "Total Sales",
            format_currency(kpi.total_sales),
            format!("{} orders", format_count(kpi.total_orders as u64)),
        ),
        (
            "Total Profit",
            format_currency(kpi.total_profit),
            format!("{} margin", format_percent(kpi.profit_margin_percent)),
        ),
        (
            "Average Order Value",
            format_currency(kpi.average_order_value),
            format!("{} items sold", format_count(kpi.total_quantity)),
        ),
        (
            "Unique Customers",
            format_count(kpi.unique_customers as u64),
            format!("{:.1} orders/customer", kpi.orders_per_customer),
        ),
        (
            "Profit Margin",
            format_percent(kpi.profit_margin_percent),
            kpi.margin_status.label().to_string(),
        ),
    ]
}

/// The KPI panel as aligned text.
pub fn kpi_panel(kpi: &KpiSummary) -> String {
    let mut out = String::from("Key Performance Indicators\n");
    for (label, value, note) in kpi_lines(kpi) {
        let _ = writeln!(out, "  {label:<21}{value:>16}   ({note})");
    }
    out
}

/// Footer with the date range and row count of the filtered table.
pub fn footer(kpi: &KpiSummary) -> String {
    let date = |d: Option<NaiveDate>| {
        d.map_or_else(|| "-".to_string(), |d| d.format(DATE_FORMAT).to_string())
    };
    format!(
        "Data range: {} to {} | Total records: {}",
        date(kpi.first_date),
        date(kpi.last_date),
        format_count(kpi.total_orders as u64)
    )
}

const PREVIEW_COLUMNS: [(&str, usize); 10] = [
    ("Date", 10),
    ("Product", 16),
    ("Category", 13),
    ("Region", 8),
    ("Sales", 10),
    ("Qty", 3),
    ("Customer", 10),
    ("Segment", 11),
    ("Disc%", 5),
    ("Profit", 9),
];

/// The first `limit` rows as a fixed-width table.
pub fn preview_table(rows: &[SalesRow], limit: usize) -> String {
    let mut out = String::new();
    let header: Vec<String> = PREVIEW_COLUMNS
        .iter()
        .map(|&(name, width)| format!("{name:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end());

    for row in rows.iter().take(limit) {
        let r = &row.record;
        let cells = [
            r.date.format(DATE_FORMAT).to_string(),
            r.product.clone(),
            r.category.clone(),
            r.region.clone(),
            format!("{:.2}", r.sales),
            r.quantity.to_string(),
            r.customer_id.clone(),
            r.segment.clone(),
            format!("{:.0}", r.discount),
            format!("{:.2}", r.profit),
        ];
        let line: Vec<String> = cells
            .iter()
            .zip(PREVIEW_COLUMNS)
            .map(|(cell, (_, width))| format!("{:<width$}", truncate_string(cell, width)))
            .collect();
        let _ = writeln!(out, "{}", line.join(" ").trim_end());
    }

    if rows.len() > limit {
        let _ = writeln!(out, "... {} more rows", format_count((rows.len() - limit) as u64));
    }
    out
}

/// The filter choices a dataset offers, one selector per line.
pub fn options_listing(options: &FilterOptions) -> String {
    let mut out = String::new();
    if let (Some(min), Some(max)) = (options.min_date, options.max_date) {
        let _ = writeln!(out, "Date Range: {} to {}", min.format(DATE_FORMAT), max.format(DATE_FORMAT));
    }
    for dimension in Dimension::FILTERABLE {
        let _ = writeln!(out, "{}: {}", dimension.label(), options.choices(dimension).join(", "));
    }
    out
}

/// One-line description of the data behind a report.
pub fn dataset_line(dataset: &SalesDataset) -> String {
    match dataset.date_bounds() {
        Some((min, max)) => format!(
            "{} records from {} to {}",
            format_count(dataset.len() as u64),
            min.format(DATE_FORMAT),
            max.format(DATE_FORMAT)
        ),
        None => "0 records".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::sample_rows;

    fn sample_kpi() -> KpiSummary {
        KpiSummary::compute(&sample_rows(), 20.0)
    }

    #[test]
    fn test_kpi_lines() {
        let lines = kpi_lines(&sample_kpi());
        assert_eq!(lines[0].1, "$2,800.00");
        assert_eq!(lines[0].2, "6 orders");
        assert_eq!(lines[1].1, "$519.00");
        assert_eq!(lines[1].2, "18.5% margin");
        assert_eq!(lines[2].1, "$466.67");
        assert_eq!(lines[2].2, "9 items sold");
        assert_eq!(lines[3].1, "4");
        assert_eq!(lines[3].2, "1.5 orders/customer");
        assert_eq!(lines[4].1, "18.5%");
        assert_eq!(lines[4].2, "Needs attention");
    }

    #[test]
    fn test_kpi_panel_contains_every_metric() {
        let panel = kpi_panel(&sample_kpi());
        for label in ["Total Sales", "Total Profit", "Average Order Value", "Unique Customers", "Profit Margin"] {
            assert!(panel.contains(label), "missing {label}");
        }
        assert!(panel.contains("(Needs attention)"));
    }

    #[test]
    fn test_footer() {
        assert_eq!(
            footer(&sample_kpi()),
            "Data range: 2024-01-05 to 2024-12-01 | Total records: 6"
        );
    }

    #[test]
    fn test_preview_is_limited() {
        let table = preview_table(&sample_rows(), 2);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("2024-01-05 Laptop"));
        assert_eq!(lines[3], "... 4 more rows");
    }

    #[test]
    fn test_options_listing() {
        let dataset = SalesDataset::new(sample_rows());
        let listing = options_listing(&FilterOptions::from_dataset(&dataset));
        assert!(listing.contains("Date Range: 2024-01-05 to 2024-12-01"));
        assert!(listing.contains("All, East, North, South"));
    }
}
