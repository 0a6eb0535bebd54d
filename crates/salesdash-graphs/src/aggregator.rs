//! Aggregation of sales rows into chart data.
//!
//! Every aggregator is a pure function of the rows it is given. Grouped
//! outputs are sorted by their key unless stated otherwise.

use crate::{DailyPoint, FrequencyBucket, HeatmapMatrix, ProductTotals, RegionTotals, SegmentTotals};
use chrono::NaiveDate;
use salesdash_common::SalesRow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, instrument};

/// Trait for aggregating sales rows into the data of one chart
pub trait DataAggregator {
    /// Aggregated data points
    type Output;

    /// Process the rows and return the aggregated data
    fn aggregate(&self, rows: &[SalesRow]) -> Self::Output;
}

/// Sales, profit and quantity per day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailySalesAggregator;

impl DataAggregator for DailySalesAggregator {
    type Output = Vec<DailyPoint>;

    #[instrument(skip_all, fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[SalesRow]) -> Self::Output {
        let mut days: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();
        for row in rows {
            let record = &row.record;
            let point = days.entry(record.date).or_insert_with(|| DailyPoint {
                date: record.date,
                sales: 0.0,
                profit: 0.0,
                quantity: 0,
            });
            point.sales += record.sales;
            point.profit += record.profit;
            point.quantity += u64::from(record.quantity);
        }

        let result: Vec<_> = days.into_values().collect();
        debug!("Aggregated {} daily data points", result.len());
        result
    }
}

/// The best selling products.
#[derive(Debug, Clone, Copy)]
pub struct TopProductsAggregator {
    /// Maximum number of products returned.
    pub limit: usize,
}

impl Default for TopProductsAggregator {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl TopProductsAggregator {
    /// Creates an aggregator keeping `limit` products.
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl DataAggregator for TopProductsAggregator {
    type Output = Vec<ProductTotals>;

    /// Largest sales first; equal sales are ordered by product name.
    #[instrument(skip_all, fields(rows = rows.len(), limit = self.limit))]
    fn aggregate(&self, rows: &[SalesRow]) -> Self::Output {
        let mut products: HashMap<&str, ProductTotals> = HashMap::new();
        for row in rows {
            let record = &row.record;
            let totals = products.entry(record.product.as_str()).or_insert_with(|| ProductTotals {
                product: record.product.clone(),
                sales: 0.0,
                quantity: 0,
                profit: 0.0,
            });
            totals.sales += record.sales;
            totals.quantity += u64::from(record.quantity);
            totals.profit += record.profit;
        }

        let mut result: Vec<_> = products.into_values().collect();
        result.sort_by(|a, b| {
            b.sales
                .partial_cmp(&a.sales)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.product.cmp(&b.product))
        });
        result.truncate(self.limit);
        result
    }
}

/// Totals per region.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionalAggregator;

impl DataAggregator for RegionalAggregator {
    type Output = Vec<RegionTotals>;

    #[instrument(skip_all, fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[SalesRow]) -> Self::Output {
        let mut regions: BTreeMap<&str, (RegionTotals, HashSet<&str>)> = BTreeMap::new();
        for row in rows {
            let record = &row.record;
            let (totals, customers) = regions.entry(record.region.as_str()).or_insert_with(|| {
                (
                    RegionTotals {
                        region: record.region.clone(),
                        sales: 0.0,
                        profit: 0.0,
                        quantity: 0,
                        customers: 0,
                    },
                    HashSet::new(),
                )
            });
            totals.sales += record.sales;
            totals.profit += record.profit;
            totals.quantity += u64::from(record.quantity);
            customers.insert(record.customer_id.as_str());
        }

        regions
            .into_values()
            .map(|(mut totals, customers)| {
                totals.customers = customers.len();
                totals
            })
            .collect()
    }
}

/// Totals per customer segment with each segment's share of sales.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentAggregator;

impl DataAggregator for SegmentAggregator {
    type Output = Vec<SegmentTotals>;

    #[instrument(skip_all, fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[SalesRow]) -> Self::Output {
        let mut segments: BTreeMap<&str, (f64, u64, HashSet<&str>)> = BTreeMap::new();
        for row in rows {
            let record = &row.record;
            let (sales, quantity, customers) = segments.entry(record.segment.as_str()).or_default();
            *sales += record.sales;
            *quantity += u64::from(record.quantity);
            customers.insert(record.customer_id.as_str());
        }

        let total_sales: f64 = segments.values().map(|(sales, _, _)| sales).sum();
        segments
            .into_iter()
            .map(|(segment, (sales, quantity, customers))| SegmentTotals {
                segment: segment.to_string(),
                sales,
                customers: customers.len(),
                quantity,
                average_order_value: if customers.is_empty() {
                    0.0
                } else {
                    sales / customers.len() as f64
                },
                share: if total_sales > 0.0 { sales / total_sales } else { 0.0 },
            })
            .collect()
    }
}

/// Distribution of customers over their number of orders.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseFrequencyAggregator {
    /// Maximum number of buckets returned, lowest order counts first.
    pub limit: usize,
}

impl Default for PurchaseFrequencyAggregator {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl PurchaseFrequencyAggregator {
    /// Creates an aggregator keeping `limit` buckets.
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl DataAggregator for PurchaseFrequencyAggregator {
    type Output = Vec<FrequencyBucket>;

    #[instrument(skip_all, fields(rows = rows.len(), limit = self.limit))]
    fn aggregate(&self, rows: &[SalesRow]) -> Self::Output {
        let mut orders_per_customer: HashMap<&str, usize> = HashMap::new();
        for row in rows {
            *orders_per_customer.entry(row.record.customer_id.as_str()).or_insert(0) += 1;
        }

        let mut buckets: BTreeMap<usize, usize> = BTreeMap::new();
        for order_count in orders_per_customer.into_values() {
            *buckets.entry(order_count).or_insert(0) += 1;
        }

        buckets
            .into_iter()
            .take(self.limit)
            .map(|(order_count, customer_count)| FrequencyBucket {
                order_count,
                customer_count,
            })
            .collect()
    }
}

/// Region by category sales matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatmapAggregator;

impl DataAggregator for HeatmapAggregator {
    type Output = HeatmapMatrix;

    #[instrument(skip_all, fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[SalesRow]) -> Self::Output {
        let regions: Vec<String> = rows
            .iter()
            .map(|row| row.record.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let categories: Vec<String> = rows
            .iter()
            .map(|row| row.record.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut values = vec![vec![0.0; categories.len()]; regions.len()];
        for row in rows {
            let record = &row.record;
            if let (Ok(r), Ok(c)) = (
                regions.binary_search(&record.region),
                categories.binary_search(&record.category),
            ) {
                values[r][c] += record.sales;
            }
        }

        HeatmapMatrix {
            regions,
            categories,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::{assert_approx_eq, date, sample_rows, RecordBuilder};

    #[test]
    fn test_daily_sales() {
        let points = DailySalesAggregator.aggregate(&sample_rows());

        let dates: Vec<_> = points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 5), date(2024, 2, 10), date(2024, 3, 15), date(2024, 12, 1)]
        );
        assert_approx_eq(points[0].sales, 1080.0, 1e-9);
        assert_approx_eq(points[0].profit, 182.0, 1e-9);
        assert_eq!(points[0].quantity, 3);
        assert_eq!(points[2].quantity, 4);
    }

    #[test]
    fn test_top_products_order_and_limit() {
        let products = TopProductsAggregator::new(3).aggregate(&sample_rows());

        let names: Vec<_> = products.iter().map(|p| p.product.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Bicycle", "Jeans"]);
        assert_approx_eq(products[0].sales, 2200.0, 1e-9);
        assert_approx_eq(products[2].profit, 48.0, 1e-9);
        assert_eq!(products[2].quantity, 3);
    }

    #[test]
    fn test_top_products_ties_break_by_name() {
        let rows = vec![
            RecordBuilder::on(date(2024, 1, 1)).product("Zebra Lamp", "Home & Garden").row(),
            RecordBuilder::on(date(2024, 1, 1)).product("Apple Lamp", "Home & Garden").row(),
        ];
        let products = TopProductsAggregator::default().aggregate(&rows);
        assert_eq!(products[0].product, "Apple Lamp");
        assert_eq!(products[1].product, "Zebra Lamp");
    }

    #[test]
    fn test_regional_totals() {
        let regions = RegionalAggregator.aggregate(&sample_rows());

        let names: Vec<_> = regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["East", "North", "South"]);

        let north = &regions[1];
        assert_approx_eq(north.sales, 1070.0, 1e-9);
        assert_approx_eq(north.profit, 172.0, 1e-9);
        assert_eq!(north.quantity, 5);
        assert_eq!(north.customers, 3);

        let south = &regions[2];
        assert_eq!(south.customers, 2);
    }

    #[test]
    fn test_segment_totals() {
        let segments = SegmentAggregator.aggregate(&sample_rows());

        let names: Vec<_> = segments.iter().map(|s| s.segment.as_str()).collect();
        assert_eq!(names, vec!["Consumer", "Corporate", "Home Office"]);

        let consumer = &segments[0];
        assert_approx_eq(consumer.sales, 2240.0, 1e-9);
        assert_eq!(consumer.customers, 2);
        assert_approx_eq(consumer.average_order_value, 1120.0, 1e-9);
        assert_approx_eq(consumer.share, 0.8, 1e-9);

        let share_sum: f64 = segments.iter().map(|s| s.share).sum();
        assert_approx_eq(share_sum, 1.0, 1e-9);
    }

    #[test]
    fn test_purchase_frequency() {
        let buckets = PurchaseFrequencyAggregator::default().aggregate(&sample_rows());
        assert_eq!(
            buckets,
            vec![
                FrequencyBucket { order_count: 1, customer_count: 2 },
                FrequencyBucket { order_count: 2, customer_count: 2 },
            ]
        );
    }

    #[test]
    fn test_purchase_frequency_limit_keeps_lowest_counts() {
        let mut rows = Vec::new();
        for customer in 1..=5u32 {
            for _ in 0..customer {
                rows.push(
                    RecordBuilder::on(date(2024, 1, 1))
                        .customer(&format!("CUST_{customer:05}"))
                        .row(),
                );
            }
        }
        let buckets = PurchaseFrequencyAggregator::new(3).aggregate(&rows);
        let counts: Vec<_> = buckets.iter().map(|b| b.order_count).collect();
        assert_eq!(counts, vec![1, 2, 3]);
    }

    #[test]
    fn test_heatmap_fills_missing_cells() {
        let matrix = HeatmapAggregator.aggregate(&sample_rows());

        assert_eq!(matrix.regions, vec!["East", "North", "South"]);
        assert_eq!(matrix.categories, vec!["Books", "Clothing", "Electronics", "Sports"]);
        assert_eq!(matrix.get(0, 3), Some(450.0));
        assert_eq!(matrix.get(0, 0), Some(0.0));
        assert_eq!(matrix.get(1, 2), Some(1000.0));
        assert_eq!(matrix.get(2, 2), Some(1200.0));

        let total: f64 = matrix.values.iter().flatten().sum();
        assert_approx_eq(total, 2800.0, 1e-9);
    }

    #[test]
    fn test_empty_rows() {
        assert!(DailySalesAggregator.aggregate(&[]).is_empty());
        assert!(TopProductsAggregator::default().aggregate(&[]).is_empty());
        assert!(SegmentAggregator.aggregate(&[]).is_empty());
        assert!(HeatmapAggregator.aggregate(&[]).is_empty());
    }
}
