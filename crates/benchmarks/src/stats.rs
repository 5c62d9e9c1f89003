// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Nearest-rank percentile computation.
//!
//! Percentiles use the nearest-rank method over ascending sorted
//! samples: the value at index `ceil(p * n) - 1`. Tests elsewhere
//! depend on this exact formula producing literal expected values, so
//! do not swap it for an interpolating variant.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Nearest-rank percentile of ascending sorted samples.
///
/// Returns `Duration::ZERO` for an empty slice. `p` is a fraction in
/// `(0, 1]`.
pub fn nearest_rank(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let n = sorted.len() as f64;
    let rank = (p * n).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

/// The percentile set a benchmark result reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LatencySummary {
    /// Median.
    pub p50: Duration,
    /// 95th percentile.
    pub p95: Duration,
    /// 99th percentile.
    pub p99: Duration,
}

impl LatencySummary {
    /// Sort the samples ascending and take p50/p95/p99.
    pub fn from_samples(samples: &mut Vec<Duration>) -> Self {
        samples.sort_unstable();
        Self {
            p50: nearest_rank(samples, 0.50),
            p95: nearest_rank(samples, 0.95),
            p99: nearest_rank(samples, 0.99),
        }
    }
}
