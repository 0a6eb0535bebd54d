//! Pie chart of the sales share of each customer segment.

use crate::palette::SET3;
use crate::{prepare_canvas, GraphConfig, GraphRenderer, SegmentTotals};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use salesdash_common::Result;
use salesdash_config::GraphsConfig;

/// Pie chart of sales by customer segment with percentage labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentDistributionGraph;

impl SegmentDistributionGraph {
    /// Chart title.
    pub const TITLE: &'static str = "Sales Distribution by Customer Segment";

    /// Chart configuration derived from the `graphs` settings.
    pub fn config(settings: &GraphsConfig) -> GraphConfig {
        GraphConfig::from_settings(Self::TITLE, settings)
    }
}

/// Slice colors, cycling through the qualitative palette.
fn slice_colors(count: usize) -> Vec<RGBColor> {
    SET3.iter().copied().cycle().take(count).collect()
}

impl GraphRenderer for SegmentDistributionGraph {
    type Data = Vec<SegmentTotals>;

    fn name(&self) -> &'static str {
        "segment_distribution"
    }

    fn description(&self) -> &'static str {
        "Share of sales revenue per customer segment"
    }

    fn has_data(&self, data: &Self::Data) -> bool {
        data.iter().map(|s| s.sales).sum::<f64>() > 0.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        data: &Self::Data,
        config: &GraphConfig,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let style = &config.style;
        // Slices of zero sales would only produce overlapping labels.
        let slices: Vec<&SegmentTotals> = data.iter().filter(|s| s.sales > 0.0).collect();
        let sizes: Vec<f64> = slices.iter().map(|s| s.sales).collect();
        let labels: Vec<&str> = slices.iter().map(|s| s.segment.as_str()).collect();
        let colors = slice_colors(slices.len());

        let area = prepare_canvas(root, config)?;
        let (width, height) = area.dim_in_pixel();
        let center = ((width / 2) as i32, (height / 2) as i32);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(style.label_font().into_font().color(&style.text_color));
        pie.percentages(style.label_font().into_font().color(&RGBColor(0, 0, 0)));
        area.draw(&pie)?;
        Ok(())
    }
}
