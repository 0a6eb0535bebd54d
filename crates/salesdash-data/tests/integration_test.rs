//! Integration tests for salesdash-data crate.

use proptest::prelude::*;
use salesdash_common::test_utils::property_testing::{sales_rows_strategy, CATEGORIES, PRODUCTS, REGIONS, SEGMENTS};
use salesdash_common::test_utils::{create_temp_dir, date};
use salesdash_data::catalog::{find_category, REGIONS as CATALOG_REGIONS, SEGMENTS as CATALOG_SEGMENTS};
use salesdash_data::{
    load_dataset, write_csv, DateRange, Dimension, FilterOptions, FilterSelection, GeneratorSettings,
    KpiSummary, SalesDataset, SalesGenerator, Selection,
};

#[test]
fn test_generate_write_load_filter() {
    let settings = GeneratorSettings {
        records: 300,
        customers: 40,
        days: 90,
        end_date: date(2024, 12, 31),
        seed: Some(2024),
    };
    let records = SalesGenerator::new(settings).unwrap().generate();

    let dir = create_temp_dir();
    let path = dir.path().join("data/sales_data.csv");
    write_csv(&path, &records).unwrap();

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.len(), 300);

    let options = FilterOptions::from_dataset(&dataset);
    assert!(options.regions.len() <= CATALOG_REGIONS.len());
    assert!(options.segments.iter().all(|s| CATALOG_SEGMENTS.contains(&s.as_str())));

    let december = DateRange::new(date(2024, 12, 1), date(2024, 12, 31)).unwrap();
    let filtered = FilterSelection::all()
        .with_date_range(december)
        .with(Dimension::Category, Selection::Only("Books".to_string()))
        .apply(&dataset);
    assert!(filtered.iter().all(|row| row.calendar.month == 12 && row.record.category == "Books"));

    let kpi = KpiSummary::compute(filtered.rows(), 20.0);
    assert_eq!(kpi.total_orders, filtered.len());
}

#[test]
fn test_kpi_json_shape() {
    let dataset = SalesDataset::new(salesdash_common::test_utils::sample_rows());
    let kpi = KpiSummary::compute(dataset.rows(), 20.0);
    let json = serde_json::to_value(&kpi).unwrap();

    assert_eq!(json["total_orders"], 6);
    assert_eq!(json["margin_status"], "needs_attention");
    assert_eq!(json["first_date"], "2024-01-05");
}

fn selection_strategy() -> impl Strategy<Value = FilterSelection> {
    let pick = |values: &'static [&'static str]| {
        prop_oneof![
            Just(Selection::All),
            prop::sample::select(values).prop_map(|v| Selection::Only(v.to_string())),
        ]
    };
    (
        prop::option::of((0u32..366, 0u32..120)),
        pick(&CATEGORIES),
        pick(&REGIONS),
        pick(&SEGMENTS),
        pick(&PRODUCTS),
    )
        .prop_map(|(range, category, region, segment, product)| {
            let mut selection = FilterSelection::all()
                .with(Dimension::Category, category)
                .with(Dimension::Region, region)
                .with(Dimension::Segment, segment)
                .with(Dimension::Product, product);
            if let Some((offset, len)) = range {
                let start = date(2024, 1, 1) + chrono::Duration::days(i64::from(offset));
                let end = start + chrono::Duration::days(i64::from(len));
                selection = selection.with_date_range(DateRange::new(start, end).unwrap());
            }
            selection
        })
}

proptest! {
    #[test]
    fn prop_filters_are_order_independent(
        rows in sales_rows_strategy(60),
        selection in selection_strategy(),
        rotation in 0usize..5,
        reverse in any::<bool>(),
    ) {
        let dataset = SalesDataset::new(rows);
        let expected = selection.apply(&dataset);

        let mut parts = selection.split();
        if !parts.is_empty() {
            let len = parts.len();
            parts.rotate_left(rotation % len);
        }
        if reverse {
            parts.reverse();
        }
        let stepwise = parts.iter().fold(dataset.clone(), |acc, part| part.apply(&acc));

        prop_assert_eq!(stepwise, expected.clone());
        prop_assert!(expected.iter().all(|row| selection.matches(row)));
    }

    #[test]
    fn prop_kpis_match_recomputation(rows in sales_rows_strategy(60)) {
        let kpi = KpiSummary::compute(&rows, 20.0);
        let sales: f64 = rows.iter().map(|r| r.record.sales).sum();
        let quantity: u64 = rows.iter().map(|r| u64::from(r.record.quantity)).sum();
        let mut customers: Vec<_> = rows.iter().map(|r| r.record.customer_id.clone()).collect();
        customers.sort();
        customers.dedup();

        prop_assert!((kpi.total_sales - sales).abs() < 1e-6);
        prop_assert_eq!(kpi.total_quantity, quantity);
        prop_assert_eq!(kpi.unique_customers, customers.len());
        prop_assert_eq!(kpi.total_orders, rows.len());
    }

    #[test]
    fn prop_generated_records_respect_catalog(seed in any::<u64>(), records in 1usize..200) {
        let settings = GeneratorSettings {
            records,
            customers: 25,
            days: 400,
            end_date: date(2024, 6, 30),
            seed: Some(seed),
        };
        let generated = SalesGenerator::new(settings).unwrap().generate();
        prop_assert_eq!(generated.len(), records);
        for record in &generated {
            let spec = find_category(&record.category);
            prop_assert!(spec.is_some());
            let spec = spec.unwrap();
            prop_assert!(spec.products.contains(&record.product.as_str()));
            prop_assert!(CATALOG_REGIONS.contains(&record.region.as_str()));
            prop_assert!(record.sales >= spec.min_price * 0.70 - 0.01);
            prop_assert!(record.sales <= spec.max_price * 5.0 * 1.3 + 0.01);
        }
        prop_assert!(generated.windows(2).all(|w| w[0].date <= w[1].date));
    }
}
