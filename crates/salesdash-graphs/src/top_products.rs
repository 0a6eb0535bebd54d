//! Top products horizontal bar chart, bars colored by profit.

use crate::palette::{extent, ColorScale};
use crate::{
    category_axis_end, headroom, prepare_canvas, slot_end, slot_label, GraphConfig, GraphRenderer,
    ProductTotals,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use salesdash_common::{format_currency_whole, truncate_string, Result};
use salesdash_config::GraphsConfig;

/// Horizontal bars of the best selling products, largest on top.
#[derive(Debug, Clone, Copy)]
pub struct TopProductsGraph {
    /// Number of products the chart is titled for.
    pub limit: usize,
}

impl Default for TopProductsGraph {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl TopProductsGraph {
    /// Creates the chart for the top `limit` products.
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Chart title.
    pub fn title(&self) -> String {
        format!("Top {} Products by Sales Revenue", self.limit)
    }

    /// Chart configuration derived from the `graphs` settings.
    pub fn config(&self, settings: &GraphsConfig) -> GraphConfig {
        GraphConfig::from_settings(self.title(), settings).with_labels("Sales Revenue ($)", "Product")
    }
}

impl GraphRenderer for TopProductsGraph {
    type Data = Vec<ProductTotals>;

    fn name(&self) -> &'static str {
        "top_products"
    }

    fn description(&self) -> &'static str {
        "Products ranked by sales revenue, colored by profit"
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
        // Slot 0 is the bottom of the axis, so the ranking is reversed.
        let ranked: Vec<&ProductTotals> = data.iter().rev().collect();
        let labels: Vec<String> = ranked.iter().map(|p| truncate_string(&p.product, 24)).collect();
        let (_, max_sales) = extent(data.iter().map(|p| p.sales)).unwrap_or((0.0, 0.0));
        let (min_profit, max_profit) = extent(data.iter().map(|p| p.profit)).unwrap_or((0.0, 0.0));

        let area = prepare_canvas(root, config)?;
        let mut chart = ChartBuilder::on(&area)
            .margin(style.margin)
            .x_label_area_size(40)
            .y_label_area_size(160)
            .build_cartesian_2d(0.0..headroom(max_sales), (0u32..category_axis_end(count)).into_segmented())?;

        let mut mesh = chart.configure_mesh();
        if !style.enable_grid {
            mesh.disable_mesh();
        }
        mesh.disable_y_mesh()
            .x_desc(config.x_desc())
            .y_desc(config.y_desc())
            .y_labels(count)
            .y_label_formatter(&|v| slot_label(&labels, v))
            .x_label_formatter(&|x| format_currency_whole(*x))
            .label_style(style.label_font().into_font().color(&style.text_color))
            .draw()?;

        chart.draw_series(ranked.iter().enumerate().map(|(slot, item)| {
            let color = ColorScale::Viridis.map(item.profit, min_profit, max_profit);
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(slot as u32)), (item.sales, slot_end(slot, count))],
                color.filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))?;

        let value_style = style
            .label_font()
            .into_font()
            .color(&style.text_color)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart.draw_series(ranked.iter().enumerate().map(|(slot, item)| {
            Text::new(
                format!(" {}", format_currency_whole(item.sales)),
                (item.sales, SegmentValue::CenterOf(slot as u32)),
                value_style.clone(),
            )
        }))?;
        Ok(())
    }
}
