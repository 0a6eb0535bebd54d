//! In-memory sales table and the column views used for filtering and grouping.

use chrono::NaiveDate;
use salesdash_common::{SalesRecord, SalesRow};
use serde::Serialize;
use std::collections::BTreeSet;

/// A string column of the sales table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Product category.
    Category,
    /// Sales region.
    Region,
    /// Customer segment.
    Segment,
    /// Product name.
    Product,
    /// Customer identifier.
    Customer,
}

impl Dimension {
    /// Dimensions offered as dashboard filters, in display order.
    pub const FILTERABLE: [Self; 4] = [Self::Category, Self::Region, Self::Segment, Self::Product];

    /// Reads this column from a record.
    pub fn value(self, record: &SalesRecord) -> &str {
        match self {
            Self::Category => &record.category,
            Self::Region => &record.region,
            Self::Segment => &record.segment,
            Self::Product => &record.product,
            Self::Customer => &record.customer_id,
        }
    }

    /// CSV header of the column.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Region => "Region",
            Self::Segment => "Customer_Segment",
            Self::Product => "Product",
            Self::Customer => "Customer_ID",
        }
    }

    /// Human readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Product Category",
            Self::Region => "Region",
            Self::Segment => "Customer Segment",
            Self::Product => "Product",
            Self::Customer => "Customer",
        }
    }
}

/// The loaded sales table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    rows: Vec<SalesRow>,
}

impl SalesDataset {
    /// Wraps rows that already carry their calendar parts.
    pub fn new(rows: Vec<SalesRow>) -> Self {
        Self { rows }
    }

    /// Builds a dataset from bare records, deriving calendar parts.
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self::new(records.into_iter().map(SalesRow::new).collect())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in load order.
    pub fn rows(&self) -> &[SalesRow] {
        &self.rows
    }

    /// Iterates over rows in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, SalesRow> {
        self.rows.iter()
    }

    /// Iterates over the stored records without calendar parts.
    pub fn records(&self) -> impl Iterator<Item = &SalesRecord> + '_ {
        self.rows.iter().map(|row| &row.record)
    }

    /// Consumes the dataset, returning its rows.
    pub fn into_rows(self) -> Vec<SalesRow> {
        self.rows
    }

    /// Earliest and latest transaction dates.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().map(|row| row.record.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Sorted unique values of a column.
    pub fn distinct(&self, dimension: Dimension) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| dimension.value(&row.record))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl<'a> IntoIterator for &'a SalesDataset {
    type Item = &'a SalesRow;
    type IntoIter = std::slice::Iter<'a, SalesRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<SalesRow> for SalesDataset {
    fn from_iter<I: IntoIterator<Item = SalesRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Label of the catch-all filter choice.
pub const ALL_CHOICE: &str = "All";

/// The filter choices a dataset offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Sorted unique categories.
    pub categories: Vec<String>,
    /// Sorted unique regions.
    pub regions: Vec<String>,
    /// Sorted unique customer segments.
    pub segments: Vec<String>,
    /// Sorted unique products.
    pub products: Vec<String>,
    /// Earliest transaction date.
    pub min_date: Option<NaiveDate>,
    /// Latest transaction date.
    pub max_date: Option<NaiveDate>,
}

impl FilterOptions {
    /// Collects the choices from a dataset.
    pub fn from_dataset(dataset: &SalesDataset) -> Self {
        let bounds = dataset.date_bounds();
        Self {
            categories: dataset.distinct(Dimension::Category),
            regions: dataset.distinct(Dimension::Region),
            segments: dataset.distinct(Dimension::Segment),
            products: dataset.distinct(Dimension::Product),
            min_date: bounds.map(|(lo, _)| lo),
            max_date: bounds.map(|(_, hi)| hi),
        }
    }

    /// Values of one dimension without the `All` entry.
    pub fn values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Category => &self.categories,
            Dimension::Region => &self.regions,
            Dimension::Segment => &self.segments,
            Dimension::Product => &self.products,
            Dimension::Customer => &[],
        }
    }

    /// Choices for a selector: `All` followed by the sorted values.
    pub fn choices(&self, dimension: Dimension) -> Vec<String> {
        std::iter::once(ALL_CHOICE.to_string())
            .chain(self.values(dimension).iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::{date, sample_rows};

    #[test]
    fn test_date_bounds() {
        let dataset = SalesDataset::new(sample_rows());
        assert_eq!(dataset.date_bounds(), Some((date(2024, 1, 5), date(2024, 12, 1))));
        assert_eq!(SalesDataset::default().date_bounds(), None);
    }

    #[test]
    fn test_distinct_is_sorted_and_unique() {
        let dataset = SalesDataset::new(sample_rows());
        assert_eq!(dataset.distinct(Dimension::Region), vec!["East", "North", "South"]);
        assert_eq!(
            dataset.distinct(Dimension::Segment),
            vec!["Consumer", "Corporate", "Home Office"]
        );
        assert_eq!(dataset.distinct(Dimension::Customer).len(), 4);
    }

    #[test]
    fn test_filter_options_choices() {
        let options = FilterOptions::from_dataset(&SalesDataset::new(sample_rows()));
        assert_eq!(
            options.choices(Dimension::Category),
            vec!["All", "Books", "Clothing", "Electronics", "Sports"]
        );
        assert_eq!(
            options.choices(Dimension::Product),
            vec!["All", "Bicycle", "Cookbook", "Jeans", "Laptop"]
        );
        assert_eq!(options.min_date, Some(date(2024, 1, 5)));
        assert_eq!(options.max_date, Some(date(2024, 12, 1)));
    }

    #[test]
    fn test_empty_dataset_options() {
        let options = FilterOptions::from_dataset(&SalesDataset::default());
        assert_eq!(options.choices(Dimension::Region), vec!["All"]);
        assert!(options.min_date.is_none());
    }
}
