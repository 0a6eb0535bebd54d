//! Region by category sales heatmap with annotated cells.

use crate::palette::{contrast_text, ColorScale};
use crate::{
    category_axis_end, prepare_canvas, slot_end, slot_label, GraphConfig, GraphRenderer, HeatmapMatrix,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use salesdash_common::{format_currency_whole, Result};
use salesdash_config::GraphsConfig;

/// Heatmap of summed sales, regions as rows and categories as columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesHeatmapGraph;

impl SalesHeatmapGraph {
    /// Chart title.
    pub const TITLE: &'static str = "Sales Heatmap: Region vs Product Category";

    /// Chart configuration derived from the `graphs` settings.
    pub fn config(settings: &GraphsConfig) -> GraphConfig {
        GraphConfig::from_settings(Self::TITLE, settings).with_labels("Product Category", "Region")
    }
}

/// Axis slot of matrix row `row`, putting the first region on top.
const fn row_slot(row: usize, rows: usize) -> usize {
    rows - 1 - row
}

impl GraphRenderer for SalesHeatmapGraph {
    type Data = HeatmapMatrix;

    fn name(&self) -> &'static str {
        "sales_heatmap"
    }

    fn description(&self) -> &'static str {
        "Sales revenue for every region and product category"
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
        let columns = data.categories.len();
        let rows = data.regions.len();
        let row_labels: Vec<String> = data.regions.iter().rev().cloned().collect();
        let (min, max) = data.value_range().unwrap_or((0.0, 0.0));

        let area = prepare_canvas(root, config)?;
        let mut chart = ChartBuilder::on(&area)
            .margin(style.margin)
            .x_label_area_size(50)
            .y_label_area_size(110)
            .build_cartesian_2d(
                (0u32..category_axis_end(columns)).into_segmented(),
                (0u32..category_axis_end(rows)).into_segmented(),
            )?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(config.x_desc())
            .y_desc(config.y_desc())
            .x_labels(columns)
            .y_labels(rows)
            .x_label_formatter(&|v| slot_label(&data.categories, v))
            .y_label_formatter(&|v| slot_label(&row_labels, v))
            .label_style(style.label_font().into_font().color(&style.text_color))
            .draw()?;

        let cells: Vec<(usize, usize, f64)> = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (row, column)))
            .filter_map(|(row, column)| data.get(row, column).map(|value| (row, column, value)))
            .collect();

        chart.draw_series(cells.iter().map(|&(row, column, value)| {
            let slot = row_slot(row, rows);
            Rectangle::new(
                [
                    (SegmentValue::Exact(column as u32), SegmentValue::Exact(slot as u32)),
                    (slot_end(column, columns), slot_end(slot, rows)),
                ],
                ColorScale::RdYlBuR.map(value, min, max).filled(),
            )
        }))?;

        chart.draw_series(cells.iter().map(|&(row, column, value)| {
            let fill = ColorScale::RdYlBuR.map(value, min, max);
            Text::new(
                format_currency_whole(value),
                (
                    SegmentValue::CenterOf(column as u32),
                    SegmentValue::CenterOf(row_slot(row, rows) as u32),
                ),
                style
                    .label_font()
                    .into_font()
                    .color(&contrast_text(fill))
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            )
        }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_region_on_top() {
        assert_eq!(row_slot(0, 3), 2);
        assert_eq!(row_slot(2, 3), 0);
        assert_eq!(row_slot(0, 1), 0);
    }

    #[test]
    fn test_has_data() {
        let graph = SalesHeatmapGraph;
        let empty = HeatmapMatrix {
            regions: Vec::new(),
            categories: vec!["Books".into()],
            values: Vec::new(),
        };
        assert!(!graph.has_data(&empty));

        let matrix = HeatmapMatrix {
            regions: vec!["North".into()],
            categories: vec!["Books".into()],
            values: vec![vec![30.0]],
        };
        assert!(graph.has_data(&matrix));
    }

    #[test]
    fn test_config_labels() {
        let config = SalesHeatmapGraph::config(&GraphsConfig::default());
        assert_eq!(config.x_desc(), "Product Category");
        assert_eq!(config.y_desc(), "Region");
    }
}
