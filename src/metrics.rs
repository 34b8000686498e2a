use crate::model::LatencySummary;
use serde::{Deserialize, Serialize};

/// How a percentile is picked when its rank falls between two samples.
///
/// Mirrors the interpolation methods of numpy's `percentile`. The rank of
/// percentile `p` over `n` sorted samples is `p / 100 * (n - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PercentileMethod {
    #[default]
    Linear,
    Lower,
    Higher,
    /// Closest rank, ties to the even rank.
    Nearest,
    Midpoint,
}

/// Percentile `p` (0..=100) of an ascending, non-empty slice.
pub fn percentile(sorted: &[f64], p: f64, method: PercentileMethod) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (p.clamp(0.0, 100.0) * (n - 1) as f64) / 100.0;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(n - 1);
    match method {
        PercentileMethod::Linear => {
            let frac = rank - lo as f64;
            sorted[lo] + frac * (sorted[hi] - sorted[lo])
        }
        PercentileMethod::Lower => sorted[lo],
        PercentileMethod::Higher => sorted[hi],
        PercentileMethod::Nearest => sorted[(rank.round_ties_even() as usize).min(n - 1)],
        PercentileMethod::Midpoint => (sorted[lo] + sorted[hi]) / 2.0,
    }
}

/// Compute the latency summary of `samples`; `None` when there are none.
///
/// The median is always the interpolated middle value, `method` only applies
/// to the tail percentiles.
pub fn compute_latency_summary(samples: &[f64], method: PercentileMethod) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let mean = samples.iter().sum::<f64>() / n as f64;
    Some(LatencySummary {
        count: n,
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median: percentile(&sorted, 50.0, PercentileMethod::Linear),
        p90: percentile(&sorted, 90.0, method),
        p99: percentile(&sorted, 99.0, method),
        p9999: percentile(&sorted, 99.99, method),
    })
}
