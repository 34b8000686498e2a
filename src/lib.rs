//! Latency analysis tools: load latency sample files, summarize them, build
//! and downsample empirical CDFs, and plot the raw samples.

pub mod cdf;
pub mod cli;
pub mod error;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod plot;
#[cfg(feature = "plot")]
pub mod render;
pub mod sampler;
pub mod text_summary;
#[cfg(feature = "tui")]
mod tui;
