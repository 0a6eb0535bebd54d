//! # SalesDash Commands
//!
//! Implementations of the `salesdash` subcommands.
//!
//! Every command reads the shared [`AppContext`], writes its report to the
//! writer it is handed and returns `anyhow::Result` so the binary can print
//! the full error chain.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod context;
pub mod dashboard;
pub mod filters;
pub mod generate;
pub mod options;
pub mod report;
pub mod summary;

pub use context::*;
pub use dashboard::DashboardArgs;
pub use filters::FilterArgs;
pub use generate::GenerateArgs;
pub use options::OptionsArgs;
pub use summary::SummaryArgs;
