// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Named workload presets.
//!
//! Presets reflect common production shapes (messaging, ad bidding, IoT
//! telemetry, gaming, payments, session caching) so a user can start
//! from a realistic profile and override only what differs. Explicit
//! override fields always beat template defaults.

use serde::Serialize;

use crate::profile::{ProfileOverrides, WorkloadProfile};

/// A named workload preset. The catalog is static; templates serialize
/// out for listing but are never read back in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadTemplate {
    /// Stable identifier used to select the template.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// One-line description of the workload shape.
    pub description: &'static str,
    /// The preset profile.
    pub profile: WorkloadProfile,
}

impl WorkloadTemplate {
    /// Look a template up by its identifier.
    pub fn by_id(id: &str) -> Option<&'static WorkloadTemplate> {
        CATALOG.iter().find(|t| t.id == id)
    }

    /// All built-in templates.
    pub fn catalog() -> &'static [WorkloadTemplate] {
        CATALOG
    }

    /// Resolve this template into a concrete profile, applying explicit
    /// overrides on top of the preset.
    pub fn resolve(&self, overrides: &ProfileOverrides) -> WorkloadProfile {
        self.profile.merged(overrides)
    }
}

const CATALOG: &[WorkloadTemplate] = &[
    WorkloadTemplate {
        id: "social_messaging",
        name: "Social messaging platform",
        description: "Chat-scale fan-in reads, evening peaks, small items",
        profile: WorkloadProfile {
            reads_per_sec: 50_000.0,
            writes_per_sec: 20_000.0,
            storage_gb: 50_000.0,
            avg_item_size_bytes: 1024.0,
            burst_multiplier: 4.0,
            index_count: 2,
        },
    },
    WorkloadTemplate {
        id: "adtech_bidding",
        name: "AdTech real-time bidding",
        description: "Read-heavy, sub-10ms budget, tiny items, all-day peak",
        profile: WorkloadProfile {
            reads_per_sec: 100_000.0,
            writes_per_sec: 50_000.0,
            storage_gb: 10_000.0,
            avg_item_size_bytes: 512.0,
            burst_multiplier: 5.0,
            index_count: 1,
        },
    },
    WorkloadTemplate {
        id: "iot_telemetry",
        name: "Massive IoT telemetry",
        description: "Write-dominated device ingest, very small items",
        profile: WorkloadProfile {
            reads_per_sec: 10_000.0,
            writes_per_sec: 200_000.0,
            storage_gb: 500_000.0,
            avg_item_size_bytes: 128.0,
            burst_multiplier: 5.0,
            index_count: 1,
        },
    },
    WorkloadTemplate {
        id: "gaming_backend",
        name: "Large gaming backend",
        description: "Player state and matchmaking, sharp evening bursts",
        profile: WorkloadProfile {
            reads_per_sec: 30_000.0,
            writes_per_sec: 15_000.0,
            storage_gb: 8_000.0,
            avg_item_size_bytes: 2048.0,
            burst_multiplier: 6.0,
            index_count: 2,
        },
    },
    WorkloadTemplate {
        id: "fintech_payments",
        name: "FinTech payment processing",
        description: "Transactional writes, fraud-check reads, trading-hour peaks",
        profile: WorkloadProfile {
            reads_per_sec: 5_000.0,
            writes_per_sec: 2_000.0,
            storage_gb: 5_000.0,
            avg_item_size_bytes: 1024.0,
            burst_multiplier: 10.0,
            index_count: 3,
        },
    },
    WorkloadTemplate {
        id: "session_cache",
        name: "Session and profile cache",
        description: "Point reads over a modest working set, mild bursts",
        profile: WorkloadProfile {
            reads_per_sec: 20_000.0,
            writes_per_sec: 1_000.0,
            storage_gb: 200.0,
            avg_item_size_bytes: 4096.0,
            burst_multiplier: 2.0,
            index_count: 0,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<_> = WorkloadTemplate::catalog().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), WorkloadTemplate::catalog().len());
    }

    #[test]
    fn test_catalog_profiles_valid() {
        for template in WorkloadTemplate::catalog() {
            assert!(
                template.profile.validate().is_ok(),
                "template {} has invalid preset",
                template.id
            );
        }
    }

    #[test]
    fn test_lookup_and_resolve_with_override() {
        let template = WorkloadTemplate::by_id("iot_telemetry").unwrap();
        let overrides = ProfileOverrides {
            storage_gb: Some(1_000.0),
            ..Default::default()
        };
        let profile = template.resolve(&overrides);
        assert_eq!(profile.storage_gb, 1_000.0);
        assert_eq!(profile.writes_per_sec, 200_000.0);
    }

    #[test]
    fn test_unknown_template_is_none() {
        assert!(WorkloadTemplate::by_id("does_not_exist").is_none());
    }
}
