// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-store cost estimates.

use serde::{Deserialize, Serialize};

/// Which side of the migration a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// The request-priced, throttle-capable store being migrated away from.
    Source,
    /// The capacity-priced, hardware-limited store being migrated to.
    Target,
}

impl StoreKind {
    /// Stable display name.
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKind::Source => "source",
            StoreKind::Target => "target",
        }
    }
}

/// Monthly cost split by driver.
///
/// `reads + writes + storage` sums to the monthly total.
/// `index_overhead` reports the slice of that total attributable to
/// secondary indexes: write amplification under request pricing, the
/// materialized-view surcharge under infrastructure pricing. It is
/// informational and already included in the other components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Read traffic cost, USD/month.
    pub reads: f64,
    /// Write traffic cost, USD/month, including index amplification.
    pub writes: f64,
    /// Storage cost, USD/month. Zero when storage is folded into node pricing.
    pub storage: f64,
    /// Slice of the total attributable to secondary indexes or views.
    pub index_overhead: f64,
}

/// One store's estimated monthly cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Store the estimate is for.
    pub store: StoreKind,
    /// Total monthly cost in USD.
    pub monthly_cost_usd: f64,
    /// Cost split by driver. Components sum to the total.
    pub breakdown: CostBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_serde() {
        assert_eq!(
            serde_json::to_value(StoreKind::Source).unwrap(),
            serde_json::json!("source")
        );
        assert_eq!(
            serde_json::to_value(StoreKind::Target).unwrap(),
            serde_json::json!("target")
        );
    }
}
