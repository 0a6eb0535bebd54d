//! Sales per region as vertical bars colored by profit.

use crate::palette::{extent, ColorScale};
use crate::{
    category_axis_end, headroom, prepare_canvas, slot_end, slot_label, GraphConfig, GraphRenderer,
    RegionTotals,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use salesdash_common::{format_currency_whole, Result};
use salesdash_config::GraphsConfig;

/// Vertical bar chart of sales per region.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionalPerformanceGraph;

impl RegionalPerformanceGraph {
    /// Chart title.
    pub const TITLE: &'static str = "Sales Performance by Region";

    /// Chart configuration derived from the `graphs` settings.
    pub fn config(settings: &GraphsConfig) -> GraphConfig {
        GraphConfig::from_settings(Self::TITLE, settings).with_labels("Region", "Sales Revenue ($)")
    }
}

impl GraphRenderer for RegionalPerformanceGraph {
    type Data = Vec<RegionTotals>;

    fn name(&self) -> &'static str {
        "regional_performance"
    }

    fn description(&self) -> &'static str {
        "Sales revenue per region, colored by profit"
    }

    fn has_data(&self, data: &Self::Data) -> bool {
        !data.is_empty()
    }

    #[allow(clippy::cast_possible_truncation)]
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
        let count = data.len();
        let labels: Vec<String> = data.iter().map(|r| r.region.clone()).collect();
        let (_, max_sales) = extent(data.iter().map(|r| r.sales)).unwrap_or((0.0, 0.0));
        let (min_profit, max_profit) = extent(data.iter().map(|r| r.profit)).unwrap_or((0.0, 0.0));

        let area = prepare_canvas(root, config)?;
        let mut chart = ChartBuilder::on(&area)
            .margin(style.margin)
            .x_label_area_size(50)
            .y_label_area_size(100)
            .build_cartesian_2d((0u32..category_axis_end(count)).into_segmented(), 0.0..headroom(max_sales))?;

        let mut mesh = chart.configure_mesh();
        if !style.enable_grid {
            mesh.disable_mesh();
        }
        mesh.disable_x_mesh()
            .x_desc(config.x_desc())
            .y_desc(config.y_desc())
            .x_labels(count)
            .x_label_formatter(&|v| slot_label(&labels, v))
            .y_label_formatter(&|y| format_currency_whole(*y))
            .label_style(style.label_font().into_font().color(&style.text_color))
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(slot, region)| {
            let color = ColorScale::Blues.map(region.profit, min_profit, max_profit);
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(slot as u32), 0.0), (slot_end(slot, count), region.sales)],
                color.filled(),
            );
            bar.set_margin(0, 0, 12, 12);
            bar
        }))?;

        let value_style = style
            .label_font()
            .into_font()
            .color(&style.text_color)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(data.iter().enumerate().map(|(slot, region)| {
            Text::new(
                format_currency_whole(region.sales),
                (SegmentValue::CenterOf(slot as u32), region.sales),
                value_style.clone(),
            )
        }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_labels() {
        let config = RegionalPerformanceGraph::config(&GraphsConfig::default());
        assert_eq!(config.title, "Sales Performance by Region");
        assert_eq!(config.x_desc(), "Region");
        assert_eq!(config.y_desc(), "Sales Revenue ($)");
    }

    #[test]
    fn test_has_data() {
        let graph = RegionalPerformanceGraph;
        assert!(!graph.has_data(&Vec::new()));
        assert!(graph.has_data(&vec![RegionTotals {
            region: "North".to_string(),
            sales: 1.0,
            profit: 0.5,
            quantity: 1,
            customers: 1,
        }]));
    }
}
