// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Analyzer thresholds and injected store limits.

use serde::{Deserialize, Serialize};

/// Batch limits for the store the findings should be judged against.
///
/// The analyzer is store-agnostic; limits are injected rather than
/// hard-coded so the same pass works for either store's constraints.
/// Defaults match the source store's batch-write limits (25 items,
/// 16 MiB per request).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLimits {
    /// Maximum items in one batch write.
    pub max_batch_items: u32,
    /// Maximum total payload bytes in one batch write.
    pub max_batch_bytes: u64,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_batch_items: 25,
            max_batch_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Tunable detection thresholds.
///
/// The defaults are demo-tuned starting points, not empirically derived
/// constants: validate them against real workload data before relying on
/// them in production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum share of a table's keyed traffic one key must receive to
    /// be flagged as a hot partition.
    pub hot_partition_threshold: f64,
    /// Tables with fewer keyed operations than this are skipped:
    /// insufficient evidence, not a finding.
    pub hot_partition_min_samples: usize,
    /// Downstream-to-trigger write ratio above which fan-out is flagged.
    pub fanout_multiplier: f64,
    /// Batch limits of the store under evaluation.
    pub limits: StoreLimits,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            hot_partition_threshold: 0.2,
            hot_partition_min_samples: 5,
            fanout_multiplier: 5.0,
            limits: StoreLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.hot_partition_threshold, 0.2);
        assert_eq!(config.hot_partition_min_samples, 5);
        assert_eq!(config.fanout_multiplier, 5.0);
        assert_eq!(config.limits.max_batch_items, 25);
        assert_eq!(config.limits.max_batch_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn test_partial_config_deserializes_over_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"hot_partition_threshold": 0.4}"#).unwrap();
        assert_eq!(config.hot_partition_threshold, 0.4);
        assert_eq!(config.hot_partition_min_samples, 5);
    }
}
