//! # SalesDash CLI
//!
//! Command line front end of the sales analytics dashboard.
//!
//! This crate parses the command line, resolves the configuration and
//! dispatches to the command implementations in `salesdash-commands`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;

pub use app::*;
pub use cli::*;
