//! Text summary builder for CLI output.
//!
//! Formats the latency summary as the human-readable lines printed by `latency-cdf`.

use crate::model::{CdfConfig, LatencySummary};
use serde::Serialize;

/// Pre-formatted lines for text output.
pub struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary from computed latency statistics.
pub fn build_text_summary(summary: &LatencySummary) -> TextSummary {
    let lines = vec![
        format!("Min. latency: {}", summary.min),
        format!("Median latency: {}", summary.median),
        format!("Average latency: {}", summary.mean),
        format!("90th percentile: {}", summary.p90),
        format!("99th percentile: {}", summary.p99),
        format!("99.99th percentile: {}", summary.p9999),
    ];
    TextSummary { lines }
}

/// Everything `latency-cdf --json` prints.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub config: &'a CdfConfig,
    pub summary: &'a LatencySummary,
    pub cdf_points: usize,
    pub sampled_points: usize,
}
