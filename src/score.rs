//! Quintile scoring of customer metrics
//!
//! Each metric is binned independently into 5 equal-frequency buckets over
//! its own distribution. Buckets are cut on strictly ordered ranks rather
//! than raw values: equal values keep their table order, so duplicate-heavy
//! metrics (many one-time buyers sharing frequency 1) still split into five
//! well-formed buckets.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::rfm::CustomerMetrics;

/// Number of score buckets per metric
pub const QUINTILES: usize = 5;

/// A customer metric record with its three quintile scores, each in 1..=5
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCustomer {
    pub customer_id: String,
    pub recency: i64,
    pub frequency: usize,
    pub monetary: f64,
    pub recency_score: u8,
    pub frequency_score: u8,
    pub monetary_score: u8,
}

impl ScoredCustomer {
    /// Two-digit composite key used for segment lookup:
    /// recency score followed by frequency score
    pub fn rfm_code(&self) -> String {
        format!("{}{}", self.recency_score, self.frequency_score)
    }
}

/// Assign each value to one of 5 equal-frequency buckets, labeled 1..=5 in
/// ascending value order.
///
/// Values are ranked by (value, table position) before cutting, so ties never
/// collapse a bucket boundary. Bucket sizes differ by at most one. Fails with
/// [`Error::Binning`] when fewer than 5 values are available, since 5
/// non-empty buckets cannot be formed; callers must not degrade to fewer
/// bins.
pub fn quintile_buckets<T: PartialOrd + Copy>(
    values: &[T],
    metric: &'static str,
) -> Result<Vec<u8>> {
    let n = values.len();
    if n < QUINTILES {
        return Err(Error::Binning {
            metric,
            population: n,
        });
    }

    let mut by_rank: Vec<usize> = (0..n).collect();
    by_rank.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut buckets = vec![0u8; n];
    for (rank, &idx) in by_rank.iter().enumerate() {
        buckets[idx] = (rank * QUINTILES / n) as u8 + 1;
    }
    Ok(buckets)
}

/// Score every metric record on all three dimensions.
///
/// Recency labels are inverted: the most recent purchasers land in bucket 5,
/// the least recent in bucket 1. Frequency and monetary label ascending.
pub fn score_customers(metrics: &[CustomerMetrics]) -> Result<Vec<ScoredCustomer>> {
    let recency: Vec<i64> = metrics.iter().map(|m| m.recency).collect();
    let frequency: Vec<usize> = metrics.iter().map(|m| m.frequency).collect();
    let monetary: Vec<f64> = metrics.iter().map(|m| m.monetary).collect();

    let recency_buckets = quintile_buckets(&recency, "recency")?;
    let frequency_buckets = quintile_buckets(&frequency, "frequency")?;
    let monetary_buckets = quintile_buckets(&monetary, "monetary")?;

    Ok(metrics
        .iter()
        .enumerate()
        .map(|(i, m)| ScoredCustomer {
            customer_id: m.customer_id.clone(),
            recency: m.recency,
            frequency: m.frequency,
            monetary: m.monetary,
            recency_score: (QUINTILES + 1) as u8 - recency_buckets[i],
            frequency_score: frequency_buckets[i],
            monetary_score: monetary_buckets[i],
        })
        .collect())
}
