//! Graph rendering trait and shared drawing helpers

use crate::GraphConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use salesdash_common::{Result, SalesDashError};
use salesdash_config::ChartFormat;
use std::path::Path;
use tracing::debug;

/// Trait for graph renderers that draw one chart from aggregated data.
pub trait GraphRenderer: Send + Sync {
    /// The type of data this renderer expects.
    type Data;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;

    /// Gets the description of this graph type.
    fn description(&self) -> &'static str;

    /// Whether `data` holds anything worth drawing.
    fn has_data(&self, data: &Self::Data) -> bool;

    /// Draws the chart onto a drawing area of any backend.
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        data: &Self::Data,
        config: &GraphConfig,
    ) -> Result<()>
    where
        DB::ErrorType: 'static;

    /// Render a graph to a file path in the configured format.
    ///
    /// Empty data is refused and no file is written.
    fn render_to_file(&self, data: &Self::Data, config: &GraphConfig, path: &Path) -> Result<()> {
        if !self.has_data(data) {
            return Err(SalesDashError::graph(format!(
                "No data available for {} chart",
                self.name()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let size = (config.width, config.height);
        match config.format {
            ChartFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(&root, data, config)?;
                root.present()?;
            }
            ChartFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(&root, data, config)?;
                root.present()?;
            }
        }

        debug!(graph = self.name(), path = %path.display(), "Rendered chart");
        Ok(())
    }
}

/// Fills the background and draws the title, returning the area below it.
pub fn prepare_canvas<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &GraphConfig,
) -> Result<DrawingArea<DB, Shift>>
where
    DB::ErrorType: 'static,
{
    let style = &config.style;
    root.fill(&style.background_color)?;
    let titled = root.titled(
        &config.title,
        style.title_font().into_font().color(&style.text_color),
    )?;
    Ok(titled)
}

/// Upper axis bound leaving headroom for value labels above the bars.
pub fn headroom(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

/// Inclusive upper index of a category axis with `count` slots.
///
/// Integer axes count both ends, so `0..=count-1` gives `count` segments. A
/// single category still gets a non-degenerate range.
#[allow(clippy::cast_possible_truncation)]
pub fn category_axis_end(count: usize) -> u32 {
    count.saturating_sub(1).max(1) as u32
}

/// Right (or top) edge of category slot `index` on an axis of `count` slots.
#[allow(clippy::cast_possible_truncation)]
pub fn slot_end(index: usize, count: usize) -> SegmentValue<u32> {
    if index + 1 < count.max(2) {
        SegmentValue::Exact(index as u32 + 1)
    } else {
        SegmentValue::Last
    }
}

/// Label of the category centered in a slot, empty elsewhere.
pub fn slot_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(index) => labels.get(*index as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}
