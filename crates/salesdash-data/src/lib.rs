//! # SalesDash Data
//!
//! Everything the dashboard does with the sales table before charts are
//! drawn: loading the CSV, filtering it, computing KPIs, and writing it back
//! out. The synthetic data generator lives here as well.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod catalog;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod generator;
pub mod kpi;
pub mod loader;

pub use dataset::*;
pub use export::*;
pub use filter::*;
pub use generator::*;
pub use kpi::*;
pub use loader::*;
