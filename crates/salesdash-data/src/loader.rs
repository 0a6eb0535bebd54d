//! CSV loading of the sales table.

use crate::SalesDataset;
use salesdash_common::{Result, SalesDashError, SalesRecord, SalesRow};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, instrument};

/// Loads the sales table from a CSV file.
///
/// A missing file is reported with a hint to generate sample data first.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_dataset(path: &Path) -> Result<SalesDataset> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SalesDashError::data_with_source(
                format!(
                    "Sales data not found at '{}'. Run `salesdash generate` first to create sample data.",
                    path.display()
                ),
                e,
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let dataset = load_from_reader(file)?;
    match dataset.date_bounds() {
        Some((first, last)) => info!(rows = dataset.len(), %first, %last, "Loaded sales data"),
        None => info!(rows = 0, "Loaded empty sales data"),
    }
    Ok(dataset)
}

/// Loads the sales table from any CSV source with a header row.
pub fn load_from_reader<R: Read>(reader: R) -> Result<SalesDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<SalesRecord>()
        .map(|result| result.map(SalesRow::new).map_err(SalesDashError::from))
        .collect::<Result<Vec<_>>>()
        .map(SalesDataset::new)
}
