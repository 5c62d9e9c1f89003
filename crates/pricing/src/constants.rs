// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pricing constants.
//!
//! Defaults reflect published us-east-1 on-demand rates for the source
//! store and an i3en.2xlarge-class node for the target store. They are
//! starting points for an estimate, not a quote: pass overridden
//! constants for other regions, reserved capacity, or newer hardware.

use serde::{Deserialize, Serialize};

/// Average seconds in a month (730 hours).
pub const SECONDS_PER_MONTH: f64 = 730.0 * 3600.0;

/// Request-based pricing constants for the source store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestPricing {
    /// USD per single read unit.
    pub price_per_read: f64,
    /// USD per single write unit.
    pub price_per_write: f64,
    /// USD per GB-month of storage.
    pub price_per_gb_month: f64,
}

impl Default for RequestPricing {
    fn default() -> Self {
        Self {
            // $0.25 per million reads, $1.25 per million writes.
            price_per_read: 0.25 / 1_000_000.0,
            price_per_write: 1.25 / 1_000_000.0,
            price_per_gb_month: 0.25,
        }
    }
}

/// Infrastructure-based pricing constants for the target store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfrastructurePricing {
    /// Sustained ops/sec one node absorbs.
    pub per_node_capacity_ops: f64,
    /// USD per node per month.
    pub per_node_monthly_usd: f64,
    /// Replication floor: never price fewer nodes than this.
    pub min_nodes: u32,
    /// Multiplier applied when secondary indexes become materialized
    /// views on the target (index data duplicated on the nodes).
    pub view_overhead: f64,
}

impl Default for InfrastructurePricing {
    fn default() -> Self {
        Self {
            per_node_capacity_ops: 100_000.0,
            // i3en.2xlarge at $0.626/h over a 730-hour month.
            per_node_monthly_usd: 0.626 * 730.0,
            min_nodes: 3,
            view_overhead: 1.25,
        }
    }
}

/// Constants for both strategies, bundled for the estimate entry point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConstants {
    /// Source-store request pricing.
    pub request: RequestPricing,
    /// Target-store infrastructure pricing.
    pub infrastructure: InfrastructurePricing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_published_rates() {
        let request = RequestPricing::default();
        assert_eq!(request.price_per_write, 1.25e-6);
        assert_eq!(request.price_per_gb_month, 0.25);

        let infra = InfrastructurePricing::default();
        assert_eq!(infra.min_nodes, 3);
        assert_eq!(infra.view_overhead, 1.25);
        assert!((infra.per_node_monthly_usd - 456.98).abs() < 0.01);
    }

    #[test]
    fn test_partial_override_deserializes() {
        let constants: PricingConstants =
            serde_json::from_str(r#"{"infrastructure": {"min_nodes": 6}}"#).unwrap();
        assert_eq!(constants.infrastructure.min_nodes, 6);
        assert_eq!(constants.request.price_per_gb_month, 0.25);
    }
}
