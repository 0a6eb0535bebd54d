//! Command line filter flags shared by `dashboard` and `summary`.

use chrono::NaiveDate;
use clap::Args;
use salesdash_common::{csv_date, Result};
use salesdash_data::{DateRange, Dimension, FilterSelection, SalesDataset, Selection};

/// The dashboard's sidebar filters as command line flags.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// First day to include (YYYY-MM-DD); defaults to the earliest date
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD); defaults to the latest date
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Product category, or "All"
    #[arg(long)]
    pub category: Option<Selection>,

    /// Sales region, or "All"
    #[arg(long)]
    pub region: Option<Selection>,

    /// Customer segment, or "All"
    #[arg(long)]
    pub segment: Option<Selection>,

    /// Product name, or "All"
    #[arg(long)]
    pub product: Option<Selection>,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    csv_date::parse(value).ok_or_else(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

impl FilterArgs {
    /// Resolves the flags against a dataset.
    ///
    /// A single date bound is completed from the dataset's date range.
    pub fn selection(&self, dataset: &SalesDataset) -> Result<FilterSelection> {
        let mut selection = FilterSelection::all();
        if let Some(range) = DateRange::resolve(self.from, self.to, dataset.date_bounds())? {
            selection = selection.with_date_range(range);
        }

        let dimensions = [
            (Dimension::Category, &self.category),
            (Dimension::Region, &self.region),
            (Dimension::Segment, &self.segment),
            (Dimension::Product, &self.product),
        ];
        for (dimension, value) in dimensions {
            if let Some(value) = value {
                selection = selection.with(dimension, value.clone());
            }
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::{date, sample_rows};

    fn sample() -> SalesDataset {
        SalesDataset::new(sample_rows())
    }

    #[test]
    fn test_no_flags_keep_everything() {
        let selection = FilterArgs::default().selection(&sample()).unwrap();
        assert!(selection.is_unrestricted());
    }

    #[test]
    fn test_open_ended_range_uses_dataset_bounds() {
        let args = FilterArgs {
            from: Some(date(2024, 3, 1)),
            ..FilterArgs::default()
        };
        let selection = args.selection(&sample()).unwrap();
        let range = selection.date_range.unwrap();
        assert_eq!(range.start(), date(2024, 3, 1));
        assert_eq!(range.end(), date(2024, 12, 1));
        assert_eq!(selection.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_dimension_flags() {
        let args = FilterArgs {
            region: Some("North".parse().unwrap()),
            category: Some("All".parse().unwrap()),
            ..FilterArgs::default()
        };
        let selection = args.selection(&sample()).unwrap();
        assert_eq!(selection.region, Selection::Only("North".to_string()));
        assert!(selection.category.is_all());
        assert_eq!(selection.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let args = FilterArgs {
            from: Some(date(2024, 5, 1)),
            to: Some(date(2024, 4, 1)),
            ..FilterArgs::default()
        };
        assert!(args.selection(&sample()).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-10"), Ok(date(2024, 2, 10)));
        assert!(parse_date("tomorrow").is_err());
    }
}
