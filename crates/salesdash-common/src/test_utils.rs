//! Test utilities and shared fixtures for the sales dashboard.
//!
//! This module provides common testing helpers and small, hand-checked
//! datasets that can be used across all crates in the workspace for unit and
//! integration testing.

use crate::{SalesRecord, SalesRow};
use chrono::NaiveDate;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "testing")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Builder for sales records with sensible defaults.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: SalesRecord,
}

impl RecordBuilder {
    /// Starts a record dated `date` with one unit of a Laptop sold for $100.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            record: SalesRecord {
                date,
                product: "Laptop".to_string(),
                category: "Electronics".to_string(),
                region: "North".to_string(),
                sales: 100.0,
                quantity: 1,
                customer_id: "CUST_00001".to_string(),
                segment: "Consumer".to_string(),
                discount: 0.0,
                profit: 15.0,
            },
        }
    }

    /// Sets product and category.
    pub fn product(mut self, product: &str, category: &str) -> Self {
        self.record.product = product.to_string();
        self.record.category = category.to_string();
        self
    }

    /// Sets the region.
    pub fn region(mut self, region: &str) -> Self {
        self.record.region = region.to_string();
        self
    }

    /// Sets the customer segment.
    pub fn segment(mut self, segment: &str) -> Self {
        self.record.segment = segment.to_string();
        self
    }

    /// Sets the customer identifier.
    pub fn customer(mut self, customer_id: &str) -> Self {
        self.record.customer_id = customer_id.to_string();
        self
    }

    /// Sets sales and profit amounts.
    pub fn amounts(mut self, sales: f64, profit: f64) -> Self {
        self.record.sales = sales;
        self.record.profit = profit;
        self
    }

    /// Sets the quantity.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.record.quantity = quantity;
        self
    }

    /// Sets the discount percentage.
    pub fn discount(mut self, discount: f64) -> Self {
        self.record.discount = discount;
        self
    }

    /// Finishes the record.
    pub fn build(self) -> SalesRecord {
        self.record
    }

    /// Finishes the record and derives its calendar parts.
    pub fn row(self) -> SalesRow {
        SalesRow::new(self.record)
    }
}

/// Small hand-checked dataset used by filter, KPI and aggregation tests.
///
/// | # | date | product | category | region | segment | customer | sales | qty | profit |
/// |---|------|---------|----------|--------|---------|----------|-------|-----|--------|
/// | 0 | 2024-01-05 | Laptop | Electronics | North | Consumer | CUST_00001 | 1000.00 | 1 | 150.00 |
/// | 1 | 2024-01-05 | Jeans | Clothing | South | Corporate | CUST_00002 | 80.00 | 2 | 32.00 |
/// | 2 | 2024-02-10 | Laptop | Electronics | South | Consumer | CUST_00001 | 1200.00 | 1 | 180.00 |
/// | 3 | 2024-03-15 | Cookbook | Books | North | Home Office | CUST_00003 | 30.00 | 3 | 6.00 |
/// | 4 | 2024-03-15 | Jeans | Clothing | North | Consumer | CUST_00004 | 40.00 | 1 | 16.00 |
/// | 5 | 2024-12-01 | Bicycle | Sports | East | Corporate | CUST_00002 | 450.00 | 1 | 135.00 |
pub fn sample_records() -> Vec<SalesRecord> {
    vec![
        RecordBuilder::on(date(2024, 1, 5))
            .amounts(1000.0, 150.0)
            .build(),
        RecordBuilder::on(date(2024, 1, 5))
            .product("Jeans", "Clothing")
            .region("South")
            .segment("Corporate")
            .customer("CUST_00002")
            .amounts(80.0, 32.0)
            .quantity(2)
            .discount(10.0)
            .build(),
        RecordBuilder::on(date(2024, 2, 10))
            .region("South")
            .amounts(1200.0, 180.0)
            .build(),
        RecordBuilder::on(date(2024, 3, 15))
            .product("Cookbook", "Books")
            .segment("Home Office")
            .customer("CUST_00003")
            .amounts(30.0, 6.0)
            .quantity(3)
            .build(),
        RecordBuilder::on(date(2024, 3, 15))
            .product("Jeans", "Clothing")
            .customer("CUST_00004")
            .amounts(40.0, 16.0)
            .build(),
        RecordBuilder::on(date(2024, 12, 1))
            .product("Bicycle", "Sports")
            .region("East")
            .segment("Corporate")
            .customer("CUST_00002")
            .amounts(450.0, 135.0)
            .build(),
    ]
}

/// [`sample_records`] with calendar parts attached.
pub fn sample_rows() -> Vec<SalesRow> {
    sample_records().into_iter().map(SalesRow::new).collect()
}

/// CSV text of [`sample_records`] in the on-disk column layout.
pub const SAMPLE_CSV: &str = "\
Date,Product,Category,Region,Sales,Quantity,Customer_ID,Customer_Segment,Discount,Profit
2024-01-05,Laptop,Electronics,North,1000.0,1,CUST_00001,Consumer,0,150.0
2024-01-05,Jeans,Clothing,South,80.0,2,CUST_00002,Corporate,10,32.0
2024-02-10,Laptop,Electronics,South,1200.0,1,CUST_00001,Consumer,0,180.0
2024-03-15,Cookbook,Books,North,30.0,3,CUST_00003,Home Office,0,6.0
2024-03-15,Jeans,Clothing,North,40.0,1,CUST_00004,Consumer,0,16.0
2024-12-01,Bicycle,Sports,East,450.0,1,CUST_00002,Corporate,0,135.0
";

/// Property-based testing strategies using proptest.
#[cfg(feature = "testing")]
pub mod property_testing {
    use super::{date, RecordBuilder};
    use crate::SalesRow;
    use proptest::prelude::*;

    /// Categories used by generated rows.
    pub const CATEGORIES: [&str; 3] = ["Electronics", "Clothing", "Books"];
    /// Regions used by generated rows.
    pub const REGIONS: [&str; 3] = ["North", "South", "East"];
    /// Segments used by generated rows.
    pub const SEGMENTS: [&str; 2] = ["Consumer", "Corporate"];
    /// Products used by generated rows.
    pub const PRODUCTS: [&str; 3] = ["Laptop", "Jeans", "Cookbook"];

    /// Strategy for a row drawn from small value sets within 2024.
    pub fn sales_row_strategy() -> impl Strategy<Value = SalesRow> {
        (
            0u32..366,
            0usize..PRODUCTS.len(),
            0usize..CATEGORIES.len(),
            0usize..REGIONS.len(),
            0usize..SEGMENTS.len(),
            1u32..50,
            1.0f64..2000.0,
            1u32..6,
        )
            .prop_map(|(day, product, category, region, segment, customer, sales, qty)| {
                let date = date(2024, 1, 1) + chrono::Duration::days(i64::from(day));
                RecordBuilder::on(date)
                    .product(PRODUCTS[product], CATEGORIES[category])
                    .region(REGIONS[region])
                    .segment(SEGMENTS[segment])
                    .customer(&format!("CUST_{customer:05}"))
                    .amounts((sales * 100.0).round() / 100.0, (sales * 20.0).round() / 100.0)
                    .quantity(qty)
                    .row()
            })
    }

    /// Strategy for a dataset of up to `max_len` rows.
    pub fn sales_rows_strategy(max_len: usize) -> impl Strategy<Value = Vec<SalesRow>> {
        prop::collection::vec(sales_row_strategy(), 0..max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_sample_csv_matches_records() {
        let mut reader = csv::Reader::from_reader(SAMPLE_CSV.as_bytes());
        let parsed: Vec<SalesRecord> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(parsed, sample_records());
    }

    #[test]
    fn test_sample_rows_have_calendar_parts() {
        let rows = sample_rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].calendar.quarter, 4);
        assert_eq!(rows[5].calendar.month_name(), "December");
    }
}
