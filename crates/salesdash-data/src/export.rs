//! Writing sales records back to CSV.

use chrono::NaiveDateTime;
use salesdash_common::{Result, SalesRecord};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes records with the dataset header to any writer. The header is written
/// even when there are no records.
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut writer = csv::Writer::from_writer(writer);
    let mut written = 0;
    for record in records {
        writer.serialize(record)?;
        written += 1;
    }
    if written == 0 {
        writer.write_record(SalesRecord::COLUMNS)?;
    }
    writer.flush()?;
    Ok(written)
}

/// Writes records to a CSV file, creating parent directories as needed.
pub fn write_csv<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let written = write_records(File::create(path)?, records)?;
    info!(path = %path.display(), records = written, "Wrote sales CSV");
    Ok(written)
}

/// File name for a filtered export taken at `timestamp`.
pub fn filtered_export_name(timestamp: NaiveDateTime) -> String {
    format!("sales_data_filtered_{}.csv", timestamp.format("%Y%m%d_%H%M%S"))
}
