// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! The detection passes.

use std::collections::BTreeMap;

use migratory_core::finding::FindingEvidence;
use migratory_core::{
    AccessPatternFinding, AnalysisReport, FindingKind, IndexDeclaration, Operation, OperationKind,
    Severity,
};
use tracing::debug;

use crate::config::AnalyzerConfig;

/// Analyze declared operations and indexes for access anti-patterns.
///
/// Empty operation input returns an empty report flagged
/// `parse_incomplete` rather than an error: callers downstream still
/// assemble a partial comparative report from whatever else they have.
pub fn analyze(
    operations: &[Operation],
    indexes: &[IndexDeclaration],
    config: &AnalyzerConfig,
) -> AnalysisReport {
    if operations.is_empty() {
        debug!("no operations to analyze, returning incomplete report");
        return AnalysisReport::incomplete();
    }

    let mut findings = Vec::new();
    detect_hot_partitions(operations, config, &mut findings);
    detect_index_proliferation(indexes, &mut findings);
    detect_fanout(operations, config, &mut findings);
    detect_oversized_batches(operations, config, &mut findings);

    findings.sort_by(AccessPatternFinding::report_order);
    debug!(
        operations = operations.len(),
        findings = findings.len(),
        "analysis complete"
    );

    AnalysisReport {
        findings,
        parse_incomplete: false,
        operations_seen: operations.len(),
    }
}

/// Frequency table over key literals, per table. BTreeMaps keep the pass
/// deterministic; ties on the hottest key resolve to the smallest key.
fn detect_hot_partitions(
    operations: &[Operation],
    config: &AnalyzerConfig,
    findings: &mut Vec<AccessPatternFinding>,
) {
    let mut tables: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for op in operations {
        if let Some(key) = op.key_literal.as_deref() {
            *tables
                .entry(op.table.as_str())
                .or_default()
                .entry(key)
                .or_default() += 1;
        }
    }

    for (table, counts) in tables {
        let total: usize = counts.values().sum();
        if total < config.hot_partition_min_samples {
            continue;
        }
        let (hot_key, hot_count) = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, c)| (*k, *c))
            .unwrap_or(("", 0));
        let share = hot_count as f64 / total as f64;
        if share < config.hot_partition_threshold {
            continue;
        }

        let severity = if share >= 0.5 {
            Severity::High
        } else if share >= 0.3 {
            Severity::Medium
        } else {
            Severity::Low
        };

        findings.push(AccessPatternFinding {
            kind: FindingKind::HotPartition,
            severity,
            table: table.to_string(),
            key: Some(hot_key.to_string()),
            evidence: FindingEvidence::KeyShare {
                hot_count,
                total_count: total,
                share,
            },
            recommendation: format!(
                "key `{hot_key}` receives {:.0}% of keyed traffic on `{table}`; \
                 shard it with a composite key (e.g. `{hot_key}#<bucket>`) so load \
                 spreads across partitions",
                share * 100.0
            ),
        });
    }
}

fn detect_index_proliferation(
    indexes: &[IndexDeclaration],
    findings: &mut Vec<AccessPatternFinding>,
) {
    let mut per_table: BTreeMap<&str, BTreeMap<&str, ()>> = BTreeMap::new();
    for index in indexes {
        per_table
            .entry(index.table.as_str())
            .or_default()
            .insert(index.name.as_str(), ());
    }

    for (table, names) in per_table {
        let count = names.len();
        if count == 0 {
            continue;
        }
        let severity = match count {
            1 => Severity::Low,
            2 => Severity::Medium,
            _ => Severity::High,
        };
        findings.push(AccessPatternFinding {
            kind: FindingKind::IndexProliferation,
            severity,
            table: table.to_string(),
            key: None,
            evidence: FindingEvidence::IndexCount { count },
            recommendation: format!(
                "`{table}` declares {count} secondary index(es); each one adds a full \
                 unit of write amplification under request pricing. The target store \
                 serves the same reads from materialized views at node cost"
            ),
        });
    }
}

/// Downstream writes are puts carrying `item_count > 1` (the synthetic
/// trigger rows a parsing adapter emits for stream processors); plain
/// puts and transactional writes on the same table are the triggers.
fn detect_fanout(
    operations: &[Operation],
    config: &AnalyzerConfig,
    findings: &mut Vec<AccessPatternFinding>,
) {
    #[derive(Default)]
    struct FanoutCounts {
        trigger_writes: usize,
        downstream_writes: u64,
    }

    let mut per_table: BTreeMap<&str, FanoutCounts> = BTreeMap::new();
    for op in operations {
        if !matches!(op.kind, OperationKind::Put | OperationKind::TransactWrite) {
            continue;
        }
        let entry = per_table.entry(op.table.as_str()).or_default();
        match op.item_count {
            Some(count) if count > 1 => entry.downstream_writes += u64::from(count),
            _ => entry.trigger_writes += 1,
        }
    }

    for (table, counts) in per_table {
        if counts.trigger_writes == 0 || counts.downstream_writes == 0 {
            continue;
        }
        let amplification = counts.downstream_writes as f64 / counts.trigger_writes as f64;
        if amplification <= config.fanout_multiplier {
            continue;
        }
        let severity = if amplification >= config.fanout_multiplier * 2.0 {
            Severity::High
        } else {
            Severity::Medium
        };
        findings.push(AccessPatternFinding {
            kind: FindingKind::Fanout,
            severity,
            table: table.to_string(),
            key: None,
            evidence: FindingEvidence::WriteAmplification {
                trigger_writes: counts.trigger_writes,
                downstream_writes: counts.downstream_writes,
                amplification,
            },
            recommendation: format!(
                "writes to `{table}` fan out {amplification:.1}x downstream; fold the \
                 downstream writes into a single batch on the target store instead of \
                 per-item trigger invocations"
            ),
        });
    }
}

fn detect_oversized_batches(
    operations: &[Operation],
    config: &AnalyzerConfig,
    findings: &mut Vec<AccessPatternFinding>,
) {
    for op in operations {
        if op.kind != OperationKind::BatchWrite {
            continue;
        }
        let item_count = u64::from(op.item_count.unwrap_or(0));
        let total_bytes = op.item_size_bytes;
        let over_items = item_count > u64::from(config.limits.max_batch_items);
        let over_bytes = total_bytes.is_some_and(|b| b > config.limits.max_batch_bytes);
        if !over_items && !over_bytes {
            continue;
        }
        let severity = if item_count >= u64::from(config.limits.max_batch_items) * 2
            || total_bytes.is_some_and(|b| b >= config.limits.max_batch_bytes * 2)
        {
            Severity::High
        } else {
            Severity::Medium
        };
        findings.push(AccessPatternFinding {
            kind: FindingKind::OversizedBatch,
            severity,
            table: op.table.clone(),
            key: op.key_literal.clone(),
            evidence: FindingEvidence::BatchSize {
                item_count,
                total_bytes,
                item_limit: config.limits.max_batch_items,
                byte_limit: config.limits.max_batch_bytes,
            },
            recommendation: format!(
                "batch write on `{}` exceeds the store limit ({} items / {} bytes); \
                 split it client-side or it will be rejected outright",
                op.table, config.limits.max_batch_items, config.limits.max_batch_bytes
            ),
        });
    }
}
