//! CDF downsampling.
//!
//! Latency CDFs have most of their mass in a narrow band of distinct values
//! and a long, thin tail. Points on the dense side of the threshold are kept
//! as they are; the sparse side is reduced to a uniform random sample drawn
//! without replacement. The result is re-sorted into CDF order.
//!
//! The default policy (`threshold = 1.0`, dense `Above`) leaves the dense side
//! empty, since no normalised fraction exceeds 1.0: every point is then
//! subject to sampling. Callers that want the bulk preserved pick a lower
//! threshold or flip the direction.

use crate::error::SampleError;
use crate::model::CdfPoint;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which side of the threshold is kept in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DenseRegion {
    /// Dense iff `fraction > threshold`.
    #[default]
    Above,
    /// Dense iff `fraction <= threshold`.
    AtOrBelow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingPolicy {
    pub threshold: f64,
    pub dense_region: DenseRegion,
    /// Share of the sparse points to keep.
    pub sparse_frac: f64,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            dense_region: DenseRegion::Above,
            sparse_frac: 0.1,
        }
    }
}

impl SamplingPolicy {
    /// Policy that keeps about `target` sparse points out of `total`.
    pub fn targeting(target: usize, total: usize) -> Self {
        let sparse_frac = if total == 0 {
            0.0
        } else {
            target as f64 / total as f64
        };
        Self {
            sparse_frac,
            ..Self::default()
        }
    }

    pub fn is_dense(&self, fraction: f64) -> bool {
        match self.dense_region {
            DenseRegion::Above => fraction > self.threshold,
            DenseRegion::AtOrBelow => fraction <= self.threshold,
        }
    }

    fn validate(&self) -> Result<(), SampleError> {
        if !self.threshold.is_finite() {
            return Err(SampleError::InvalidPolicy(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        if !self.sparse_frac.is_finite() || self.sparse_frac < 0.0 {
            return Err(SampleError::InvalidPolicy(format!(
                "sparse fraction must be a finite non-negative number, got {}",
                self.sparse_frac
            )));
        }
        Ok(())
    }

    /// Number of sparse points drawn from a pool of `sparse_count`.
    pub fn sparse_sample_size(&self, sparse_count: usize) -> usize {
        let wanted = (sparse_count as f64 * self.sparse_frac).floor() as usize;
        wanted.min(sparse_count)
    }
}

/// Downsample `points` according to `policy`, drawing from `rng`.
pub fn sample_cdf<R: Rng + ?Sized>(
    points: &[CdfPoint],
    policy: &SamplingPolicy,
    rng: &mut R,
) -> Result<Vec<CdfPoint>, SampleError> {
    policy.validate()?;

    let (dense, sparse): (Vec<usize>, Vec<usize>) =
        (0..points.len()).partition(|&i| policy.is_dense(points[i].fraction));

    let amount = policy.sparse_sample_size(sparse.len());
    log::debug!(
        "cdf sampling: {} dense, {} sparse, drawing {}",
        dense.len(),
        sparse.len(),
        amount
    );

    let mut keep = dense;
    if amount > 0 {
        keep.extend(
            rand::seq::index::sample(rng, sparse.len(), amount)
                .into_iter()
                .map(|i| sparse[i]),
        );
    }
    keep.sort_unstable();

    Ok(keep.into_iter().map(|i| points[i]).collect())
}
