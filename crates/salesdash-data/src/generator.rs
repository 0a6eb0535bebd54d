//! Synthetic sales data with category price bands and seasonal effects.

use crate::catalog::{
    CategorySpec, CATALOG, DISCOUNT_WEIGHTS, QUANTITY_WEIGHTS, REGIONS, SEGMENTS, SUMMER_CATEGORIES,
};
use chrono::{Datelike, Duration, Local, NaiveDate};
use salesdash_common::{Result, SalesDashError, SalesRecord};
use tracing::{debug, info, instrument};

/// Settings of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Number of records to produce.
    pub records: usize,
    /// Size of the customer pool, ids `CUST_00001` upward.
    pub customers: usize,
    /// Length of the date window in days.
    pub days: u32,
    /// Last day of the window.
    pub end_date: NaiveDate,
    /// Seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            records: 5000,
            customers: 1000,
            days: 730,
            end_date: Local::now().date_naive(),
            seed: None,
        }
    }
}

impl GeneratorSettings {
    fn validate(&self) -> Result<()> {
        if self.records == 0 {
            return Err(SalesDashError::validation_field("records must be at least 1", "records"));
        }
        if self.customers == 0 {
            return Err(SalesDashError::validation_field("customers must be at least 1", "customers"));
        }
        if self.days == 0 {
            return Err(SalesDashError::validation_field("days must be at least 1", "days"));
        }
        self.start_date().map(|_| ())
    }

    /// First day of the window, or an error when it falls outside the calendar.
    pub fn start_date(&self) -> Result<NaiveDate> {
        self.end_date
            .checked_sub_signed(Duration::days(i64::from(self.days)))
            .ok_or_else(|| {
                SalesDashError::validation_field(
                    format!("a {} day window ending {} is out of range", self.days, self.end_date),
                    "days",
                )
            })
    }
}

/// Formats the id of the `n`th customer, counting from 1.
pub fn customer_id(n: usize) -> String {
    format!("CUST_{n:05}")
}

/// Random sales record generator.
pub struct SalesGenerator {
    settings: GeneratorSettings,
    start: NaiveDate,
    rng: fastrand::Rng,
}

impl SalesGenerator {
    /// Creates a generator, seeding it when the settings carry a seed.
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        settings.validate()?;
        let start = settings.start_date()?;
        let rng = settings.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Ok(Self { settings, start, rng })
    }

    /// The settings this generator runs with.
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Produces the configured number of records, sorted by date.
    #[instrument(skip(self), fields(records = self.settings.records, seed = ?self.settings.seed))]
    pub fn generate(&mut self) -> Vec<SalesRecord> {
        let mut records: Vec<SalesRecord> = (0..self.settings.records).map(|_| self.record()).collect();
        records.sort_by_key(|record| record.date);

        info!(
            records = records.len(),
            start = %self.start,
            end = %self.settings.end_date,
            "Generated sales data"
        );
        records
    }

    fn record(&mut self) -> SalesRecord {
        let offset = self.rng.i64(0..=i64::from(self.settings.days));
        let date = self.start + Duration::days(offset);

        let spec = &CATALOG[self.rng.usize(..CATALOG.len())];
        let product = spec.products[self.rng.usize(..spec.products.len())];
        let region = REGIONS[self.rng.usize(..REGIONS.len())];
        let segment = SEGMENTS[self.rng.usize(..SEGMENTS.len())];
        let customer = customer_id(self.rng.usize(1..=self.settings.customers));

        let base_price = self.uniform(spec.min_price, spec.max_price);
        let quantity = self.weighted(&QUANTITY_WEIGHTS);
        let discount = self.weighted(&DISCOUNT_WEIGHTS);

        let mut sales = base_price * f64::from(quantity) * (1.0 - f64::from(discount) / 100.0);
        let mut profit = sales * spec.profit_margin * self.uniform(0.8, 1.2);
        let (sales_boost, profit_boost) = self.seasonal_boost(spec, date);
        sales *= sales_boost;
        profit *= profit_boost;

        SalesRecord {
            date,
            product: product.to_string(),
            category: spec.name.to_string(),
            region: region.to_string(),
            sales: round_cents(sales),
            quantity,
            customer_id: customer,
            segment: segment.to_string(),
            discount: f64::from(discount),
            profit: round_cents(profit),
        }
    }

    /// Holiday months lift every category; summer lifts the summer categories.
    fn seasonal_boost(&mut self, spec: &CategorySpec, date: NaiveDate) -> (f64, f64) {
        match date.month() {
            11 | 12 => (self.uniform(1.1, 1.3), self.uniform(1.1, 1.3)),
            6..=8 if SUMMER_CATEGORIES.contains(&spec.name) => {
                (self.uniform(1.05, 1.15), self.uniform(1.05, 1.15))
            }
            _ => (1.0, 1.0),
        }
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.rng.f64() * (high - low)
    }

    fn weighted(&mut self, choices: &[(u32, u32)]) -> u32 {
        let total: u32 = choices.iter().map(|(_, weight)| weight).sum();
        let mut ticket = self.rng.u32(..total);
        for &(value, weight) in choices {
            if ticket < weight {
                return value;
            }
            ticket -= weight;
        }
        debug!("Weighted draw fell through, using last choice");
        choices.last().map_or(0, |&(value, _)| value)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_category;
    use salesdash_common::test_utils::date;

    fn settings(records: usize, seed: u64) -> GeneratorSettings {
        GeneratorSettings {
            records,
            customers: 50,
            days: 365,
            end_date: date(2024, 12, 31),
            seed: Some(seed),
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let first = SalesGenerator::new(settings(200, 42)).unwrap().generate();
        let second = SalesGenerator::new(settings(200, 42)).unwrap().generate();
        let other = SalesGenerator::new(settings(200, 43)).unwrap().generate();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_output_is_sorted_and_in_window() {
        let records = SalesGenerator::new(settings(500, 1)).unwrap().generate();
        assert_eq!(records.len(), 500);
        assert!(records.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(records.iter().all(|r| r.date >= date(2024, 1, 1) && r.date <= date(2024, 12, 31)));
    }

    #[test]
    fn test_values_come_from_catalog() {
        for record in SalesGenerator::new(settings(1000, 7)).unwrap().generate() {
            let spec = find_category(&record.category).unwrap();
            assert!(spec.products.contains(&record.product.as_str()));
            assert!(REGIONS.contains(&record.region.as_str()));
            assert!(SEGMENTS.contains(&record.segment.as_str()));
            assert!((1..=5).contains(&record.quantity));
            assert!(DISCOUNT_WEIGHTS.iter().any(|(d, _)| f64::from(*d) == record.discount));
            assert!(record.sales >= spec.min_price * 0.70 - 0.01);
            assert!(record.sales <= spec.max_price * 5.0 * 1.3 + 0.01);
        }
    }

    #[test]
    fn test_customer_pool() {
        let records = SalesGenerator::new(settings(1000, 9)).unwrap().generate();
        assert!(records.iter().all(|r| {
            let n: usize = r.customer_id.trim_start_matches("CUST_").parse().unwrap();
            (1..=50).contains(&n)
        }));
        assert_eq!(customer_id(1), "CUST_00001");
        assert_eq!(customer_id(1000), "CUST_01000");
    }

    #[test]
    fn test_amounts_are_rounded_to_cents() {
        for record in SalesGenerator::new(settings(200, 3)).unwrap().generate() {
            assert!(((record.sales * 100.0).round() - record.sales * 100.0).abs() < 1e-6);
            assert!(((record.profit * 100.0).round() - record.profit * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_invalid_settings() {
        assert!(SalesGenerator::new(settings(0, 1)).is_err());
        let mut no_customers = settings(10, 1);
        no_customers.customers = 0;
        assert!(SalesGenerator::new(no_customers).is_err());
    }

    #[test]
    fn test_window_length_is_checked() {
        let mut empty_window = settings(10, 1);
        empty_window.days = 0;
        let err = SalesGenerator::new(empty_window).err().unwrap();
        assert!(matches!(err, SalesDashError::Validation { field: Some(ref f), .. } if f == "days"));

        let mut huge_window = settings(10, 1);
        huge_window.days = 200_000_000;
        assert!(huge_window.start_date().is_err());
        let err = SalesGenerator::new(huge_window).err().unwrap();
        assert!(matches!(err, SalesDashError::Validation { field: Some(ref f), .. } if f == "days"));
    }

    #[test]
    fn test_start_date() {
        assert_eq!(settings(1, 1).start_date().unwrap(), date(2024, 1, 1));
    }
}
