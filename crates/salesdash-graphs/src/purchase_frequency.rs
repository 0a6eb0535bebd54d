//! Histogram of customers by their number of orders.

use crate::{
    category_axis_end, headroom, prepare_canvas, slot_end, slot_label, FrequencyBucket, GraphConfig,
    GraphRenderer,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use salesdash_common::{format_count, Result};
use salesdash_config::GraphsConfig;

/// Bar chart of how many customers placed each number of orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurchaseFrequencyGraph;

impl PurchaseFrequencyGraph {
    /// Chart title.
    pub const TITLE: &'static str = "Customer Purchase Frequency Distribution";

    /// Chart configuration derived from the `graphs` settings.
    pub fn config(settings: &GraphsConfig) -> GraphConfig {
        GraphConfig::from_settings(Self::TITLE, settings)
            .with_labels("Number of Orders", "Number of Customers")
    }
}

impl GraphRenderer for PurchaseFrequencyGraph {
    type Data = Vec<FrequencyBucket>;

    fn name(&self) -> &'static str {
        "purchase_frequency"
    }

    fn description(&self) -> &'static str {
        "Number of customers per order count"
    }

    fn has_data(&self, data: &Self::Data) -> bool {
        data.iter().any(|bucket| bucket.customer_count > 0)
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
        let labels: Vec<String> = data.iter().map(|b| b.order_count.to_string()).collect();
        let max_customers = data.iter().map(|b| b.customer_count).max().unwrap_or(0) as f64;

        let area = prepare_canvas(root, config)?;
        let mut chart = ChartBuilder::on(&area)
            .margin(style.margin)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d((0u32..category_axis_end(count)).into_segmented(), 0.0..headroom(max_customers))?;

        let mut mesh = chart.configure_mesh();
        if !style.enable_grid {
            mesh.disable_mesh();
        }
        mesh.disable_x_mesh()
            .x_desc(config.x_desc())
            .y_desc(config.y_desc())
            .x_labels(count)
            .x_label_formatter(&|v| slot_label(&labels, v))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .label_style(style.label_font().into_font().color(&style.text_color))
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(slot, bucket)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(slot as u32), 0.0),
                    (slot_end(slot, count), bucket.customer_count as f64),
                ],
                style.sales_color.mix(0.8).filled(),
            );
            bar.set_margin(0, 0, 2, 2);
            bar
        }))?;

        let value_style = style
            .label_font()
            .into_font()
            .color(&style.text_color)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(data.iter().enumerate().map(|(slot, bucket)| {
            Text::new(
                format_count(bucket.customer_count as u64),
                (SegmentValue::CenterOf(slot as u32), bucket.customer_count as f64),
                value_style.clone(),
            )
        }))?;
        Ok(())
    }
}
