// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark run results.
//!
//! The harness that produces these lives in `migratory-benchmarks`; the
//! result type lives here so report assembly does not depend on the
//! harness or its connectors.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cost::StoreKind;

/// Aggregated outcome of one benchmark run against one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// Store the run was driven against.
    pub store: StoreKind,
    /// Median latency over successful operations (nearest-rank).
    pub p50: Duration,
    /// 95th percentile latency (nearest-rank).
    pub p95: Duration,
    /// 99th percentile latency (nearest-rank).
    pub p99: Duration,
    /// Completed operations divided by measured wall-clock time.
    pub throughput_ops_per_sec: f64,
    /// Operations the store throttled.
    pub throttled_count: u64,
    /// Operations that failed outright.
    pub failed_count: u64,
    /// Operations that completed (success, throttled, or failed).
    pub completed_count: u64,
    /// True when the run timed out before all operations completed.
    pub incomplete: bool,
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
}

impl BenchmarkResult {
    /// Operations that returned success.
    pub fn success_count(&self) -> u64 {
        self.completed_count
            .saturating_sub(self.throttled_count)
            .saturating_sub(self.failed_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_count_saturates() {
        let result = BenchmarkResult {
            run_id: Uuid::new_v4(),
            store: StoreKind::Source,
            p50: Duration::from_millis(5),
            p95: Duration::from_millis(5),
            p99: Duration::from_millis(5),
            throughput_ops_per_sec: 100.0,
            throttled_count: 30,
            failed_count: 0,
            completed_count: 100,
            incomplete: false,
            timestamp: Utc::now(),
        };
        assert_eq!(result.success_count(), 70);
    }
}
