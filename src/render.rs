//! PNG rendering of latency samples using [`plotters`].
//!
//! The figure is a fixed 10x6 inch canvas rasterized at the requested DPI,
//! drawn with the bitmap backend so it works in headless environments.

use crate::error::RenderError;
use crate::model::PlotStyle;
use crate::plot::{self, AxisScale};
use plotters::prelude::*;
use std::path::Path;

type Result<T> = core::result::Result<T, RenderError>;

/// Render `samples` (x = sample index) to a PNG at `output_path`.
pub fn render_png(
    samples: &[f64],
    style: PlotStyle,
    scale: AxisScale,
    output_path: &Path,
    dpi: u32,
) -> Result<()> {
    if samples.is_empty() {
        return Err(RenderError::Empty);
    }

    // Font and stroke sizes are given in points and scaled with the DPI.
    let px = |pt: f64| ((pt * dpi as f64) / 72.0).round().max(1.0) as u32;

    let root = BitMapBackend::new(output_path, plot::figure_pixels(dpi)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

    let (x_lo, x_hi) = plot::x_bounds(samples.len());
    let (y_lo, y_hi) = plot::y_bounds(samples, scale);

    let mut chart = ChartBuilder::on(&root)
        .caption(plot::TITLE, ("sans-serif", px(14.0)))
        .margin(px(8.0))
        .x_label_area_size(px(36.0))
        .y_label_area_size(px(60.0))
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(plot::X_LABEL)
        .y_desc(plot::Y_LABEL)
        .label_style(("sans-serif", px(10.0)))
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| scale.format_tick(*y))
        .draw()
        .map_err(|e| RenderError::Drawing(e.to_string()))?;

    let points = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, scale.project(v)));

    match style {
        PlotStyle::Line => {
            chart
                .draw_series(LineSeries::new(points, BLUE.stroke_width(px(1.0))))
                .map_err(|e| RenderError::Drawing(e.to_string()))?
                .label(plot::SERIES_LABEL)
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
        }
        PlotStyle::Stem => {
            let stems: Vec<(f64, f64)> = points.collect();
            chart
                .draw_series(
                    stems
                        .iter()
                        .map(|&(x, y)| PathElement::new(vec![(x, y_lo), (x, y)], &BLUE)),
                )
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
            chart
                .draw_series(
                    stems
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), px(2.0), BLUE.filled())),
                )
                .map_err(|e| RenderError::Drawing(e.to_string()))?
                .label(plot::SERIES_LABEL)
                .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));
        }
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", px(10.0)))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| RenderError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| RenderError::Drawing(e.to_string()))?;

    Ok(())
}
