//! # SalesDash Common
//!
//! Shared types, errors, logging and formatting helpers for the sales
//! analytics dashboard.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace: the [`SalesRecord`] row model with its derived calendar
//! columns, the [`SalesDashError`] error type and the tracing setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
