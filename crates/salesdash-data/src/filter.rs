//! Row filters: a date range plus four equality selections, ANDed together.

use crate::{Dimension, SalesDataset, ALL_CHOICE};
use chrono::NaiveDate;
use salesdash_common::{Result, SalesDashError, SalesRow};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Selection of a single categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No restriction.
    #[default]
    All,
    /// Keep rows whose column equals the value.
    Only(String),
}

impl Selection {
    /// Whether a column value passes the selection.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Whether this selection restricts anything.
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_CHOICE) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CHOICE),
            Self::Only(value) => f.write_str(value),
        }
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range; `start` after `end` is rejected.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SalesDashError::validation_field(
                format!("start date {start} is after end date {end}"),
                "date_range",
            ));
        }
        Ok(Self { start, end })
    }

    /// Builds a range from optional ends, filling a missing end from the
    /// dataset bounds. Returns `None` when neither end is given.
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Option<Self>> {
        let (start, end) = match (from, to, bounds) {
            (None, None, _) => return Ok(None),
            (Some(start), Some(end), _) => (start, end),
            (Some(start), None, Some((_, max))) => (start, max.max(start)),
            (None, Some(end), Some((min, _))) => (min.min(end), end),
            (Some(day), None, None) | (None, Some(day), None) => (day, day),
        };
        Self::new(start, end).map(Some)
    }

    /// First day of the range.
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether a date falls inside the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The full filter state of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    /// Date range, unrestricted when `None`.
    pub date_range: Option<DateRange>,
    /// Product category.
    pub category: Selection,
    /// Sales region.
    pub region: Selection,
    /// Customer segment.
    pub segment: Selection,
    /// Product name.
    pub product: Selection,
}

impl FilterSelection {
    /// A selection that keeps every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the date range.
    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Restricts one categorical column.
    #[must_use]
    pub fn with(mut self, dimension: Dimension, selection: Selection) -> Self {
        match dimension {
            Dimension::Category => self.category = selection,
            Dimension::Region => self.region = selection,
            Dimension::Segment => self.segment = selection,
            Dimension::Product => self.product = selection,
            Dimension::Customer => {}
        }
        self
    }

    fn selections(&self) -> [(Dimension, &Selection); 4] {
        [
            (Dimension::Category, &self.category),
            (Dimension::Region, &self.region),
            (Dimension::Segment, &self.segment),
            (Dimension::Product, &self.product),
        ]
    }

    /// Whether no predicate is active.
    pub fn is_unrestricted(&self) -> bool {
        self.date_range.is_none() && self.selections().iter().all(|(_, s)| s.is_all())
    }

    /// Whether a row passes every active predicate.
    pub fn matches(&self, row: &SalesRow) -> bool {
        self.date_range.map_or(true, |range| range.contains(row.record.date))
            && self
                .selections()
                .iter()
                .all(|(dimension, selection)| selection.matches(dimension.value(&row.record)))
    }

    /// Keeps the matching rows, preserving their order.
    pub fn apply(&self, dataset: &SalesDataset) -> SalesDataset {
        let filtered: SalesDataset = dataset.iter().filter(|row| self.matches(row)).cloned().collect();
        debug!(
            before = dataset.len(),
            after = filtered.len(),
            filters = %self,
            "Applied filters"
        );
        filtered
    }

    /// Splits the selection into single-predicate selections whose
    /// successive application equals [`FilterSelection::apply`].
    pub fn split(&self) -> Vec<Self> {
        let mut parts = Vec::new();
        if let Some(range) = self.date_range {
            parts.push(Self::all().with_date_range(range));
        }
        for (dimension, selection) in self.selections() {
            if !selection.is_all() {
                parts.push(Self::all().with(dimension, selection.clone()));
            }
        }
        parts
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date_range {
            Some(range) => write!(f, "date={}..={}", range.start, range.end)?,
            None => f.write_str("date=All")?,
        }
        write!(
            f,
            " category={} region={} segment={} product={}",
            self.category, self.region, self.segment, self.product
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::{date, sample_rows};

    fn sample() -> SalesDataset {
        SalesDataset::new(sample_rows())
    }

    fn only(value: &str) -> Selection {
        Selection::Only(value.to_string())
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("All".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("all".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!(" North ".parse::<Selection>().unwrap(), only("North"));
    }

    #[test]
    fn test_selection_is_case_sensitive_for_values() {
        assert!(only("North").matches("North"));
        assert!(!only("North").matches("north"));
    }

    #[test]
    fn test_date_range_validation() {
        assert!(DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
        assert!(DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 5), date(2024, 3, 15)).unwrap();
        let filtered = FilterSelection::all().with_date_range(range).apply(&sample());
        assert_eq!(filtered.len(), 5);
    }

    #[test]
    fn test_resolve_fills_missing_end() {
        let bounds = Some((date(2024, 1, 5), date(2024, 12, 1)));

        let range = DateRange::resolve(Some(date(2024, 3, 1)), None, bounds).unwrap().unwrap();
        assert_eq!((range.start(), range.end()), (date(2024, 3, 1), date(2024, 12, 1)));

        let range = DateRange::resolve(None, Some(date(2024, 2, 1)), bounds).unwrap().unwrap();
        assert_eq!((range.start(), range.end()), (date(2024, 1, 5), date(2024, 2, 1)));

        assert_eq!(DateRange::resolve(None, None, bounds).unwrap(), None);
        assert!(DateRange::resolve(Some(date(2024, 3, 1)), Some(date(2024, 2, 1)), bounds).is_err());
    }

    #[test]
    fn test_resolve_outside_bounds_keeps_range_valid() {
        let bounds = Some((date(2024, 1, 5), date(2024, 12, 1)));
        let range = DateRange::resolve(Some(date(2025, 6, 1)), None, bounds).unwrap().unwrap();
        assert_eq!((range.start(), range.end()), (date(2025, 6, 1), date(2025, 6, 1)));
        assert!(FilterSelection::all().with_date_range(range).apply(&sample()).is_empty());
    }

    #[test]
    fn test_all_keeps_everything() {
        let dataset = sample();
        let selection = FilterSelection::all();
        assert!(selection.is_unrestricted());
        assert_eq!(selection.apply(&dataset), dataset);
    }

    #[test]
    fn test_combined_filters() {
        let selection = FilterSelection::all()
            .with(Dimension::Region, only("North"))
            .with(Dimension::Category, only("Clothing"));
        let filtered = selection.apply(&sample());

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows()[0].record.customer_id, "CUST_00004");
    }

    #[test]
    fn test_no_match_gives_empty_dataset() {
        let selection = FilterSelection::all()
            .with(Dimension::Product, only("Laptop"))
            .with(Dimension::Segment, only("Corporate"));
        assert!(selection.apply(&sample()).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let filtered = FilterSelection::all().with(Dimension::Region, only("North")).apply(&sample());
        let products: Vec<_> = filtered.records().map(|r| r.product.as_str()).collect();
        assert_eq!(products, vec!["Laptop", "Cookbook", "Jeans"]);
    }

    #[test]
    fn test_split_counts_active_predicates() {
        let selection = FilterSelection::all()
            .with_date_range(DateRange::new(date(2024, 1, 1), date(2024, 6, 30)).unwrap())
            .with(Dimension::Segment, only("Consumer"));
        assert_eq!(selection.split().len(), 2);
        assert!(FilterSelection::all().split().is_empty());
    }

    #[test]
    fn test_display() {
        let selection = FilterSelection::all().with(Dimension::Region, only("West"));
        assert_eq!(
            selection.to_string(),
            "date=All category=All region=West segment=All product=All"
        );
    }
}
