//! Error types for the library half of the crate.
//!
//! The binaries wrap these with `anyhow` context and turn them into exit codes.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File '{}' does not exist.", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected `<label>,<latency>`, got {content:?}")]
    MissingColumn { line: usize, content: String },

    #[error("line {line}: invalid latency value {token:?}")]
    InvalidValue { line: usize, token: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum SampleError {
    #[error("invalid sampling policy: {0}")]
    InvalidPolicy(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid unit divisor {0}")]
    InvalidDivisor(f64),
}

/// Errors that can occur while rendering a latency plot.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("no samples to plot")]
    Empty,

    #[error("failed to prepare drawing area: {0}")]
    DrawingArea(String),

    #[error("failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("failed to draw chart elements: {0}")]
    Drawing(String),
}
