//! Axis handling shared by the PNG renderer and the terminal display.
//!
//! Log scale is implemented by projecting values into log10 space and
//! formatting the ticks back, so both backends work on plain linear axes.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub const TITLE: &str = "Latency over Time";
pub const X_LABEL: &str = "Sample";
pub const Y_LABEL: &str = "Latency (nanoseconds)";
pub const SERIES_LABEL: &str = "Latency (ns)";

/// Figure size in inches.
pub const FIGURE_INCHES: (u32, u32) = (10, 6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

impl AxisScale {
    /// Map a sample into axis space.
    pub fn project(self, v: f64) -> f64 {
        match self {
            AxisScale::Linear => v,
            AxisScale::Log => v.log10(),
        }
    }

    /// Label for a tick at axis position `y`.
    pub fn format_tick(self, y: f64) -> String {
        let v = match self {
            AxisScale::Linear => y,
            AxisScale::Log => 10f64.powf(y),
        };
        if v.abs() >= 100.0 || v == 0.0 {
            format!("{:.0}", v)
        } else {
            format!("{:.2}", v)
        }
    }
}

/// Pick the y scale. A log axis cannot show non-positive values, so those
/// force a linear axis with a warning.
pub fn resolve_scale(samples: &[f64], log_scale: bool) -> AxisScale {
    if !log_scale {
        return AxisScale::Linear;
    }
    if samples.iter().any(|&v| v <= 0.0) {
        log::warn!("Log scale requested but data contains non-positive values; using linear scale");
        return AxisScale::Linear;
    }
    AxisScale::Log
}

/// Y bounds in axis space: `[0, 1.1 * max]`, or `[min, 1.1 * max]` on a log axis.
pub fn y_bounds(samples: &[f64], scale: AxisScale) -> (f64, f64) {
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    match scale {
        AxisScale::Linear => {
            let hi = 1.1 * max;
            (0.0, if hi > 0.0 { hi } else { 1.0 })
        }
        AxisScale::Log => {
            let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            (scale.project(min), scale.project(1.1 * max))
        }
    }
}

/// X bounds: sample indices, never a zero-width range.
pub fn x_bounds(len: usize) -> (f64, f64) {
    (0.0, len.saturating_sub(1).max(1) as f64)
}

/// Pixel size of the figure at `dpi`.
pub fn figure_pixels(dpi: u32) -> (u32, u32) {
    (
        FIGURE_INCHES.0.saturating_mul(dpi),
        FIGURE_INCHES.1.saturating_mul(dpi),
    )
}

/// Default image name for `input`: its base name with a `.png` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .unwrap_or_else(|| OsStr::new("latency_plot"))
        .to_os_string();
    name.push(".png");
    PathBuf::from(name)
}
