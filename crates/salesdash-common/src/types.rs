//! Sales record model and the calendar columns derived from it.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// Date format written to CSV files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One sales transaction as stored in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Transaction date.
    #[serde(rename = "Date", with = "csv_date")]
    pub date: NaiveDate,
    /// Product name.
    #[serde(rename = "Product")]
    pub product: String,
    /// Product category.
    #[serde(rename = "Category")]
    pub category: String,
    /// Sales region.
    #[serde(rename = "Region")]
    pub region: String,
    /// Sales amount after discount.
    #[serde(rename = "Sales")]
    pub sales: f64,
    /// Number of items in the order.
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    /// Customer identifier.
    #[serde(rename = "Customer_ID")]
    pub customer_id: String,
    /// Customer segment.
    #[serde(rename = "Customer_Segment")]
    pub segment: String,
    /// Discount percentage applied to the order.
    #[serde(rename = "Discount")]
    pub discount: f64,
    /// Profit on the order.
    #[serde(rename = "Profit")]
    pub profit: f64,
}

impl SalesRecord {
    /// CSV header, in column order.
    pub const COLUMNS: [&'static str; 10] = [
        "Date",
        "Product",
        "Category",
        "Region",
        "Sales",
        "Quantity",
        "Customer_ID",
        "Customer_Segment",
        "Discount",
        "Profit",
    ];
}

/// Calendar attributes derived from a transaction date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarParts {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 through 12.
    pub month: u32,
    /// Quarter number, 1 through 4.
    pub quarter: u32,
    /// Day of the week.
    pub weekday: Weekday,
}

impl CalendarParts {
    /// Derives the calendar parts of a date.
    pub fn from_date(date: NaiveDate) -> Self {
        let month = date.month();
        Self {
            year: date.year(),
            month,
            quarter: (month - 1) / 3 + 1,
            weekday: date.weekday(),
        }
    }

    /// English weekday name, e.g. `Monday`.
    pub const fn day_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    /// English month name, e.g. `January`.
    pub const fn month_name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        NAMES[(self.month - 1) as usize]
    }
}

/// A sales record together with its derived calendar columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    /// The stored record.
    pub record: SalesRecord,
    /// Calendar parts computed from `record.date` at load time.
    pub calendar: CalendarParts,
}

impl SalesRow {
    /// Wraps a record and derives its calendar parts.
    pub fn new(record: SalesRecord) -> Self {
        let calendar = CalendarParts::from_date(record.date);
        Self { record, calendar }
    }
}

impl From<SalesRecord> for SalesRow {
    fn from(record: SalesRecord) -> Self {
        Self::new(record)
    }
}

/// Serde adapter for the `Date` column.
///
/// Writes `YYYY-MM-DD`. Reads plain dates as well as timestamps (the time of
/// day is dropped) and US-style `MM/DD/YYYY`.
pub mod csv_date {
    use super::{NaiveDate, NaiveDateTime, DATE_FORMAT};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    /// Parses a date cell in any of the accepted formats.
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
            return Some(date);
        }
        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
                return Some(datetime.date());
            }
        }
        NaiveDate::parse_from_str(value, "%m/%d/%Y").ok()
    }

    /// Serializes a date as `YYYY-MM-DD`.
    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    /// Deserializes a date cell.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date '{raw}'")))
    }
}
