//! Integration tests for salesdash-graphs crate.

use proptest::prelude::*;
use salesdash_common::test_utils::property_testing::sales_rows_strategy;
use salesdash_common::test_utils::{create_temp_dir, sample_rows};
use salesdash_common::SalesRow;
use salesdash_config::{ChartFormat, GraphsConfig};
use salesdash_graphs::{
    DailySalesAggregator, DataAggregator, GraphKind, GraphManager, GraphRenderer, HeatmapAggregator,
    PurchaseFrequencyAggregator, RegionalAggregator, SalesTrendGraph, SegmentAggregator,
    TopProductsAggregator,
};
use std::collections::HashSet;
use std::sync::Arc;

fn total_sales(rows: &[SalesRow]) -> f64 {
    rows.iter().map(|row| row.record.sales).sum()
}

#[test]
fn test_render_refuses_empty_data() {
    let dir = create_temp_dir();
    let path = dir.path().join("sales_trend.png");
    let config = SalesTrendGraph::config(&GraphsConfig::default());

    let result = SalesTrendGraph.render_to_file(&Vec::new(), &config, &path);
    assert!(result.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_generate_all_skips_empty_rows() {
    let dir = create_temp_dir();
    let manager = GraphManager::new(GraphsConfig::default(), dir.path());

    let generated = manager.generate_all(Arc::from(Vec::new())).await.unwrap();
    assert!(generated.is_empty());
}

#[tokio::test]
#[ignore = "requires system fonts"]
async fn test_generate_all_writes_every_enabled_chart() {
    let dir = create_temp_dir();
    let mut settings = GraphsConfig::default();
    settings.enabled.purchase_frequency = false;
    let manager = GraphManager::new(settings, dir.path().join("charts"));

    let generated = manager.generate_all(Arc::from(sample_rows())).await.unwrap();

    assert_eq!(generated.len(), 5);
    assert!(generated.iter().all(|graph| graph.kind != GraphKind::PurchaseFrequency));
    for graph in &generated {
        assert!(graph.path.exists(), "missing {}", graph.path.display());
        assert_eq!(graph.path.extension().and_then(|e| e.to_str()), Some("png"));
    }
}

#[test]
#[ignore = "requires system fonts"]
fn test_svg_output() {
    let dir = create_temp_dir();
    let mut settings = GraphsConfig::default();
    settings.format = ChartFormat::Svg;
    let manager = GraphManager::new(settings, dir.path());

    let graph = manager
        .generate(GraphKind::SalesHeatmap, &sample_rows())
        .unwrap()
        .unwrap();
    let svg = std::fs::read_to_string(&graph.path).unwrap();
    assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
    assert!(svg.contains("$1,000"));
}

proptest! {
    #[test]
    fn prop_daily_and_heatmap_totals_match(rows in sales_rows_strategy(60)) {
        let total = total_sales(&rows);

        let daily: f64 = DailySalesAggregator.aggregate(&rows).iter().map(|p| p.sales).sum();
        prop_assert!((daily - total).abs() < 1e-6);

        let matrix = HeatmapAggregator.aggregate(&rows);
        let cells: f64 = matrix.values.iter().flatten().sum();
        prop_assert!((cells - total).abs() < 1e-6);

        let regional: f64 = RegionalAggregator.aggregate(&rows).iter().map(|r| r.sales).sum();
        prop_assert!((regional - total).abs() < 1e-6);
    }

    #[test]
    fn prop_top_products_sorted_and_limited(rows in sales_rows_strategy(60), limit in 1usize..5) {
        let top = TopProductsAggregator::new(limit).aggregate(&rows);
        prop_assert!(top.len() <= limit);
        prop_assert!(top.windows(2).all(|pair| pair[0].sales >= pair[1].sales));
    }

    #[test]
    fn prop_frequency_counts_every_customer(rows in sales_rows_strategy(60)) {
        let customers: HashSet<&str> = rows.iter().map(|r| r.record.customer_id.as_str()).collect();
        let buckets = PurchaseFrequencyAggregator::new(usize::MAX).aggregate(&rows);

        let counted: usize = buckets.iter().map(|b| b.customer_count).sum();
        let orders: usize = buckets.iter().map(|b| b.order_count * b.customer_count).sum();
        prop_assert_eq!(counted, customers.len());
        prop_assert_eq!(orders, rows.len());
    }

    #[test]
    fn prop_segment_shares_sum_to_one(rows in sales_rows_strategy(60)) {
        let segments = SegmentAggregator.aggregate(&rows);
        let share: f64 = segments.iter().map(|s| s.share).sum();
        if rows.is_empty() {
            prop_assert!(segments.is_empty());
        } else {
            prop_assert!((share - 1.0).abs() < 1e-9);
        }
    }
}
