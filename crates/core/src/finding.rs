// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Access-pattern findings emitted by the pattern analyzer.
//!
//! Findings are ordered for reproducible output: severity descending,
//! then finding kind, then the affected key. Two analyzer runs over the
//! same input always produce byte-identical serialized reports.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// The category of anti-pattern a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// One partition key receives a disproportionate share of traffic.
    HotPartition,
    /// Secondary indexes multiplying write amplification.
    IndexProliferation,
    /// One logical write triggering many downstream writes.
    Fanout,
    /// A batch write exceeding the store's batch limits.
    OversizedBatch,
}

impl FindingKind {
    /// Stable name used for deterministic tie-breaking and display.
    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::HotPartition => "hot_partition",
            FindingKind::IndexProliferation => "index_proliferation",
            FindingKind::Fanout => "fanout",
            FindingKind::OversizedBatch => "oversized_batch",
        }
    }
}

/// Finding severity, ordered ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Worth noting, unlikely to block a migration.
    Low,
    /// Should be addressed during the migration.
    Medium,
    /// Will cause problems on either store if left as-is.
    High,
}

/// Structured evidence backing a finding.
///
/// Each variant carries the numbers the detector actually computed, so
/// adapters can render them without re-deriving anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingEvidence {
    /// Frequency evidence for a hot partition.
    KeyShare {
        /// Requests hitting the hottest key.
        hot_count: usize,
        /// Total keyed requests on the table.
        total_count: usize,
        /// `hot_count / total_count`.
        share: f64,
    },
    /// Declared index count on one table.
    IndexCount {
        /// Number of secondary indexes.
        count: usize,
    },
    /// Write amplification evidence for fan-out.
    WriteAmplification {
        /// Triggering logical writes.
        trigger_writes: usize,
        /// Downstream writes those triggers produce.
        downstream_writes: u64,
        /// `downstream_writes / trigger_writes`.
        amplification: f64,
    },
    /// Batch size evidence.
    BatchSize {
        /// Summed item count of the batch.
        item_count: u64,
        /// Summed payload bytes of the batch, when known.
        total_bytes: Option<u64>,
        /// Configured item limit that was exceeded, if it was.
        item_limit: u32,
        /// Configured byte limit that was exceeded, if it was.
        byte_limit: u64,
    },
}

/// One ranked anti-pattern finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPatternFinding {
    /// Anti-pattern category.
    pub kind: FindingKind,
    /// How serious the detector judged it.
    pub severity: Severity,
    /// Table the finding applies to.
    pub table: String,
    /// Affected key, for key-scoped findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Numbers the detector computed.
    pub evidence: FindingEvidence,
    /// Concrete remediation advice.
    pub recommendation: String,
}

impl AccessPatternFinding {
    /// Deterministic report ordering: severity descending, then kind
    /// name, then affected key.
    pub fn report_order(&self, other: &Self) -> Ordering {
        other
            .severity
            .cmp(&self.severity)
            .then_with(|| self.kind.as_str().cmp(other.kind.as_str()))
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| self.table.cmp(&other.table))
    }
}

/// The analyzer's full output.
///
/// Malformed or empty input never raises: the analyzer returns an empty
/// finding list with `parse_incomplete` set so downstream report
/// assembly can still proceed with whatever else it has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Findings in deterministic report order.
    pub findings: Vec<AccessPatternFinding>,
    /// True when the operation input was empty or uninterpretable.
    pub parse_incomplete: bool,
    /// Number of operations the analyzer consumed.
    pub operations_seen: usize,
}

impl AnalysisReport {
    /// An empty report flagged as incomplete.
    pub fn incomplete() -> Self {
        Self {
            findings: Vec::new(),
            parse_incomplete: true,
            operations_seen: 0,
        }
    }
}
