//! Daily sales and profit trend, drawn as two stacked line panels.

use crate::palette::extent;
use crate::{headroom, prepare_canvas, DailyPoint, GraphConfig, GraphRenderer};
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use salesdash_common::{format_currency_whole, Result, SalesDashError};
use salesdash_config::GraphsConfig;

/// Two-panel line chart of daily sales revenue and daily profit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesTrendGraph;

impl SalesTrendGraph {
    /// Chart title.
    pub const TITLE: &'static str = "Sales and Profit Trends Over Time";

    /// Chart configuration derived from the `graphs` settings.
    pub fn config(settings: &GraphsConfig) -> GraphConfig {
        GraphConfig::from_settings(Self::TITLE, settings).with_labels("Date", "Sales ($)")
    }
}

#[allow(clippy::cast_possible_truncation)]
fn date_label(first: NaiveDate, offset: f64) -> String {
    (first + Duration::days(offset.round() as i64)).format("%Y-%m-%d").to_string()
}

fn day_offset(first: NaiveDate, date: NaiveDate) -> f64 {
    (date - first).num_days() as f64
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    y_desc: &str,
    color: RGBColor,
    points: &[(f64, f64)],
    first: NaiveDate,
    config: &GraphConfig,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let style = &config.style;
    let (x_min, x_max) = extent(points.iter().map(|p| p.0)).unwrap_or((0.0, 0.0));
    let (y_min, y_max) = extent(points.iter().map(|p| p.1)).unwrap_or((0.0, 0.0));

    let mut chart = ChartBuilder::on(area)
        .caption(caption, style.label_font().into_font().color(&style.text_color))
        .margin(style.margin)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d((x_min - 0.5)..(x_max + 0.5), y_min.min(0.0)..headroom(y_max))?;

    let mut mesh = chart.configure_mesh();
    if !style.enable_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(config.x_desc())
        .y_desc(y_desc)
        .x_labels(8)
        .x_label_formatter(&|x| date_label(first, *x))
        .y_label_formatter(&|y| format_currency_whole(*y))
        .label_style(style.label_font().into_font().color(&style.text_color))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
    chart.draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))?;
    Ok(())
}

impl GraphRenderer for SalesTrendGraph {
    type Data = Vec<DailyPoint>;

    fn name(&self) -> &'static str {
        "sales_trend"
    }

    fn description(&self) -> &'static str {
        "Daily sales revenue and daily profit over the selected period"
    }

    fn has_data(&self, data: &Self::Data) -> bool {
        !data.is_empty()
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        data: &Self::Data,
        config: &GraphConfig,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let first = data
            .first()
            .map(|p| p.date)
            .ok_or_else(|| SalesDashError::graph("No data available for sales trend chart"))?;

        let sales: Vec<(f64, f64)> = data.iter().map(|p| (day_offset(first, p.date), p.sales)).collect();
        let profit: Vec<(f64, f64)> = data.iter().map(|p| (day_offset(first, p.date), p.profit)).collect();

        let area = prepare_canvas(root, config)?;
        let panels = area.split_evenly((2, 1));
        let style = &config.style;

        draw_panel(&panels[0], "Daily Sales Revenue", "Sales ($)", style.sales_color, &sales, first, config)?;
        draw_panel(&panels[1], "Daily Profit", "Profit ($)", style.profit_color, &profit, first, config)?;
        Ok(())
    }
}
