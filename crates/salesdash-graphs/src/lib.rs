//! # SalesDash Graphs
//!
//! Chart generation for the sales dashboard.
//!
//! Each chart is a pure aggregation of the filtered rows (see [`aggregator`])
//! followed by a plotters render (see [`renderer`]). The [`GraphManager`]
//! renders every enabled chart in parallel on blocking tasks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod aggregator;
pub mod manager;
pub mod palette;
pub mod renderer;
pub mod types;

// Graph implementations
pub mod purchase_frequency;
pub mod regional_performance;
pub mod sales_heatmap;
pub mod sales_trend;
pub mod segment_distribution;
pub mod top_products;

pub use aggregator::*;
pub use manager::*;
pub use renderer::*;
pub use types::*;

pub use purchase_frequency::PurchaseFrequencyGraph;
pub use regional_performance::RegionalPerformanceGraph;
pub use sales_heatmap::SalesHeatmapGraph;
pub use sales_trend::SalesTrendGraph;
pub use segment_distribution::SegmentDistributionGraph;
pub use top_products::TopProductsGraph;
