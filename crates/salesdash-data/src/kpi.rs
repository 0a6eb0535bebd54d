//! Key performance indicators of a (filtered) sales table.

use chrono::NaiveDate;
use salesdash_common::SalesRow;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::instrument;

/// Default margin percentage above which profitability is healthy.
pub const DEFAULT_HEALTHY_MARGIN_PERCENT: f64 = 20.0;

/// Verdict on the profit margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginStatus {
    /// Margin above the threshold.
    Healthy,
    /// Margin at or below the threshold.
    NeedsAttention,
}

impl MarginStatus {
    /// Classifies a margin percentage against a threshold.
    pub fn classify(margin_percent: f64, healthy_above: f64) -> Self {
        if margin_percent > healthy_above {
            Self::Healthy
        } else {
            Self::NeedsAttention
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::NeedsAttention => "Needs attention",
        }
    }
}

impl fmt::Display for MarginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary statistics shown in the KPI panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    /// Sum of sales.
    pub total_sales: f64,
    /// Sum of profit.
    pub total_profit: f64,
    /// Number of rows.
    pub total_orders: usize,
    /// Mean sales per row, 0 for an empty table.
    pub average_order_value: f64,
    /// Sum of quantities.
    pub total_quantity: u64,
    /// Number of distinct customers.
    pub unique_customers: usize,
    /// Profit as a percentage of sales, 0 when sales are not positive.
    pub profit_margin_percent: f64,
    /// Orders divided by distinct customers, 0 without customers.
    pub orders_per_customer: f64,
    /// Margin verdict.
    pub margin_status: MarginStatus,
    /// Earliest transaction date.
    pub first_date: Option<NaiveDate>,
    /// Latest transaction date.
    pub last_date: Option<NaiveDate>,
}

impl KpiSummary {
    /// Computes the KPIs of `rows` in one pass.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn compute(rows: &[SalesRow], healthy_margin_percent: f64) -> Self {
        let mut total_sales = 0.0;
        let mut total_profit = 0.0;
        let mut total_quantity = 0u64;
        let mut customers = HashSet::new();
        let mut first_date: Option<NaiveDate> = None;
        let mut last_date: Option<NaiveDate> = None;

        for row in rows {
            let record = &row.record;
            total_sales += record.sales;
            total_profit += record.profit;
            total_quantity += u64::from(record.quantity);
            customers.insert(record.customer_id.as_str());
            first_date = Some(first_date.map_or(record.date, |d| d.min(record.date)));
            last_date = Some(last_date.map_or(record.date, |d| d.max(record.date)));
        }

        let total_orders = rows.len();
        let unique_customers = customers.len();
        let average_order_value = if total_orders > 0 {
            total_sales / total_orders as f64
        } else {
            0.0
        };
        let profit_margin_percent = if total_sales > 0.0 {
            total_profit / total_sales * 100.0
        } else {
            0.0
        };
        let orders_per_customer = if unique_customers > 0 {
            total_orders as f64 / unique_customers as f64
        } else {
            0.0
        };

        Self {
            total_sales,
            total_profit,
            total_orders,
            average_order_value,
            total_quantity,
            unique_customers,
            profit_margin_percent,
            orders_per_customer,
            margin_status: MarginStatus::classify(profit_margin_percent, healthy_margin_percent),
            first_date,
            last_date,
        }
    }
}
