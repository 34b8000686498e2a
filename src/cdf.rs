//! Empirical CDF over the distinct values of a sample sequence.

use crate::model::CdfPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalCdf {
    /// Distinct values, ascending, with their occurrence counts.
    counts: Vec<(f64, u64)>,
    points: Vec<CdfPoint>,
    total: u64,
}

impl EmpiricalCdf {
    /// Group `samples` by value, count, cumulative-sum and normalise.
    ///
    /// The last cumulative count is the total, so the final fraction is
    /// exactly `1.0`.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut counts: Vec<(f64, u64)> = Vec::new();
        for v in sorted {
            match counts.last_mut() {
                Some((last, n)) if *last == v => *n += 1,
                _ => counts.push((v, 1)),
            }
        }

        let total = samples.len() as u64;
        let mut cumulative = 0u64;
        let points = counts
            .iter()
            .map(|&(value, n)| {
                cumulative += n;
                CdfPoint {
                    value,
                    fraction: cumulative as f64 / total as f64,
                }
            })
            .collect();

        Self {
            counts,
            points,
            total,
        }
    }

    pub fn points(&self) -> &[CdfPoint] {
        &self.points
    }

    pub fn counts(&self) -> &[(f64, u64)] {
        &self.counts
    }

    /// Number of samples the CDF was built from.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<CdfPoint> {
        self.points
    }
}
