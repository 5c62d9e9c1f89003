// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Workload profiles and their validation.
//!
//! A [`WorkloadProfile`] is the quantitative input to the cost model:
//! sustained read/write rates, stored volume, item size, and how far
//! peak traffic rises above baseline. Validation runs before any
//! estimate is computed; an invalid profile never produces a partial
//! result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A profile field failed its domain constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A rate, size, or count was negative or non-finite.
    #[error("field `{field}` must be a finite value >= 0, got {value}")]
    OutOfDomain {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// `burst_multiplier` must be at least 1.
    #[error("field `burst_multiplier` must be >= 1, got {0}")]
    BurstBelowOne(f64),
}

/// Quantitative description of a workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadProfile {
    /// Sustained reads per second.
    pub reads_per_sec: f64,
    /// Sustained writes per second.
    pub writes_per_sec: f64,
    /// Stored data volume in GB.
    pub storage_gb: f64,
    /// Average item size in bytes.
    pub avg_item_size_bytes: f64,
    /// Peak-to-baseline throughput ratio, >= 1.
    pub burst_multiplier: f64,
    /// Declared secondary index count.
    pub index_count: u32,
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        Self {
            reads_per_sec: 0.0,
            writes_per_sec: 0.0,
            storage_gb: 0.0,
            avg_item_size_bytes: 1024.0,
            burst_multiplier: 1.0,
            index_count: 0,
        }
    }
}

impl WorkloadProfile {
    /// Check every field against its domain constraint.
    ///
    /// Returns the first violation found; callers fix input and retry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let nonnegative = [
            ("reads_per_sec", self.reads_per_sec),
            ("writes_per_sec", self.writes_per_sec),
            ("storage_gb", self.storage_gb),
            ("avg_item_size_bytes", self.avg_item_size_bytes),
        ];
        for (field, value) in nonnegative {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::OutOfDomain { field, value });
            }
        }
        if !self.burst_multiplier.is_finite() || self.burst_multiplier < 1.0 {
            return Err(ValidationError::BurstBelowOne(self.burst_multiplier));
        }
        Ok(())
    }

    /// Apply explicit overrides on top of this profile.
    ///
    /// Explicit beats default: any field set in `overrides` replaces the
    /// value here; unset fields keep the existing value.
    pub fn merged(&self, overrides: &ProfileOverrides) -> Self {
        Self {
            reads_per_sec: overrides.reads_per_sec.unwrap_or(self.reads_per_sec),
            writes_per_sec: overrides.writes_per_sec.unwrap_or(self.writes_per_sec),
            storage_gb: overrides.storage_gb.unwrap_or(self.storage_gb),
            avg_item_size_bytes: overrides
                .avg_item_size_bytes
                .unwrap_or(self.avg_item_size_bytes),
            burst_multiplier: overrides.burst_multiplier.unwrap_or(self.burst_multiplier),
            index_count: overrides.index_count.unwrap_or(self.index_count),
        }
    }
}

/// All-optional mirror of [`WorkloadProfile`] used for template merging
/// and partial user input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileOverrides {
    /// Override for `reads_per_sec`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reads_per_sec: Option<f64>,
    /// Override for `writes_per_sec`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writes_per_sec: Option<f64>,
    /// Override for `storage_gb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_gb: Option<f64>,
    /// Override for `avg_item_size_bytes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_item_size_bytes: Option<f64>,
    /// Override for `burst_multiplier`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burst_multiplier: Option<f64>,
    /// Override for `index_count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> WorkloadProfile {
        WorkloadProfile {
            reads_per_sec: 5000.0,
            writes_per_sec: 2000.0,
            storage_gb: 500.0,
            avg_item_size_bytes: 1024.0,
            burst_multiplier: 2.0,
            index_count: 2,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(valid_profile().validate().is_ok());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut p = valid_profile();
        p.reads_per_sec = -1.0;
        assert_eq!(
            p.validate(),
            Err(ValidationError::OutOfDomain {
                field: "reads_per_sec",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_nan_storage_rejected() {
        let mut p = valid_profile();
        p.storage_gb = f64::NAN;
        assert!(matches!(
            p.validate(),
            Err(ValidationError::OutOfDomain {
                field: "storage_gb",
                ..
            })
        ));
    }

    #[test]
    fn test_burst_below_one_rejected() {
        let mut p = valid_profile();
        p.burst_multiplier = 0.5;
        assert_eq!(p.validate(), Err(ValidationError::BurstBelowOne(0.5)));
    }

    #[test]
    fn test_merge_explicit_beats_default() {
        let base = valid_profile();
        let overrides = ProfileOverrides {
            writes_per_sec: Some(9000.0),
            ..Default::default()
        };
        let merged = base.merged(&overrides);
        assert_eq!(merged.writes_per_sec, 9000.0);
        assert_eq!(merged.reads_per_sec, base.reads_per_sec);
        assert_eq!(merged.index_count, base.index_count);
    }
}
