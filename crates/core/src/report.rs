// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Comparative report assembly.
//!
//! A pure merge over whatever the caller collected: findings from the
//! analyzer, cost estimates, benchmark results. Derived deltas are
//! recomputed on every build and never cached. The only failure mode is
//! being handed nothing to merge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bench::BenchmarkResult;
use crate::cost::{CostEstimate, StoreKind};
use crate::finding::AnalysisReport;

/// The builder was given no estimates and no benchmark results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot build a comparative report from no estimates and no benchmark results")]
pub struct InsufficientData;

/// Derived source-vs-target metrics.
///
/// Each delta is present only when both sides of its inputs are, so a
/// report over partial data never carries a fabricated comparison.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportDeltas {
    /// `(source_cost - target_cost) / source_cost * 100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_savings_percent: Option<f64>,
    /// `source_p99 / target_p99`; above 1 means the target is faster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_improvement_ratio: Option<f64>,
    /// `target_throughput / source_throughput`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_improvement_ratio: Option<f64>,
}

/// Everything one advisory invocation produced, merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeReport {
    /// Pattern analysis output, when analysis ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisReport>,
    /// Cost estimates, at most one per store.
    pub estimates: Vec<CostEstimate>,
    /// Benchmark results, at most one per store.
    pub results: Vec<BenchmarkResult>,
    /// Computed source-vs-target deltas.
    pub deltas: ReportDeltas,
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
}

impl ComparativeReport {
    /// Merge analysis output, estimates, and benchmark results into one
    /// report with computed deltas.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientData`] when both `estimates` and `results`
    /// are empty; analysis findings alone are not a comparison.
    pub fn build(
        analysis: Option<AnalysisReport>,
        estimates: &[CostEstimate],
        results: &[BenchmarkResult],
    ) -> Result<Self, InsufficientData> {
        if estimates.is_empty() && results.is_empty() {
            return Err(InsufficientData);
        }

        let deltas = ReportDeltas {
            cost_savings_percent: cost_savings_percent(estimates),
            latency_improvement_ratio: latency_improvement_ratio(results),
            throughput_improvement_ratio: throughput_improvement_ratio(results),
        };

        Ok(Self {
            analysis,
            estimates: estimates.to_vec(),
            results: results.to_vec(),
            deltas,
            generated_at: Utc::now(),
        })
    }
}

fn by_store<'a, T>(items: &'a [T], store: StoreKind, key: impl Fn(&T) -> StoreKind) -> Option<&'a T> {
    items.iter().find(|item| key(item) == store)
}

fn cost_savings_percent(estimates: &[CostEstimate]) -> Option<f64> {
    let source = by_store(estimates, StoreKind::Source, |e| e.store)?;
    let target = by_store(estimates, StoreKind::Target, |e| e.store)?;
    if source.monthly_cost_usd <= 0.0 {
        return None;
    }
    Some((source.monthly_cost_usd - target.monthly_cost_usd) / source.monthly_cost_usd * 100.0)
}

fn latency_improvement_ratio(results: &[BenchmarkResult]) -> Option<f64> {
    let source = by_store(results, StoreKind::Source, |r| r.store)?;
    let target = by_store(results, StoreKind::Target, |r| r.store)?;
    let target_p99 = target.p99.as_secs_f64();
    if target_p99 <= 0.0 {
        return None;
    }
    Some(source.p99.as_secs_f64() / target_p99)
}

fn throughput_improvement_ratio(results: &[BenchmarkResult]) -> Option<f64> {
    let source = by_store(results, StoreKind::Source, |r| r.store)?;
    let target = by_store(results, StoreKind::Target, |r| r.store)?;
    if source.throughput_ops_per_sec <= 0.0 {
        return None;
    }
    Some(target.throughput_ops_per_sec / source.throughput_ops_per_sec)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;
    use crate::cost::CostBreakdown;

    fn estimate(store: StoreKind, total: f64) -> CostEstimate {
        CostEstimate {
            store,
            monthly_cost_usd: total,
            breakdown: CostBreakdown::default(),
        }
    }

    fn result(store: StoreKind, p99_ms: u64, throughput: f64) -> BenchmarkResult {
        BenchmarkResult {
            run_id: Uuid::new_v4(),
            store,
            p50: Duration::from_millis(p99_ms / 2),
            p95: Duration::from_millis(p99_ms),
            p99: Duration::from_millis(p99_ms),
            throughput_ops_per_sec: throughput,
            throttled_count: 0,
            failed_count: 0,
            completed_count: 100,
            incomplete: false,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_empty_inputs_rejected() {
        assert_eq!(
            ComparativeReport::build(None, &[], &[]),
            Err(InsufficientData)
        );
    }

    #[test]
    fn test_cost_savings_delta() {
        let estimates = [
            estimate(StoreKind::Source, 10_000.0),
            estimate(StoreKind::Target, 2_500.0),
        ];
        let report = ComparativeReport::build(None, &estimates, &[]).unwrap();
        assert_eq!(report.deltas.cost_savings_percent, Some(75.0));
        assert_eq!(report.deltas.latency_improvement_ratio, None);
    }

    #[test]
    fn test_latency_and_throughput_deltas() {
        let results = [
            result(StoreKind::Source, 20, 1_000.0),
            result(StoreKind::Target, 5, 4_000.0),
        ];
        let report = ComparativeReport::build(None, &[], &results).unwrap();
        assert_eq!(report.deltas.latency_improvement_ratio, Some(4.0));
        assert_eq!(report.deltas.throughput_improvement_ratio, Some(4.0));
    }

    #[test]
    fn test_single_estimate_builds_without_deltas() {
        let estimates = [estimate(StoreKind::Source, 10_000.0)];
        let report = ComparativeReport::build(None, &estimates, &[]).unwrap();
        assert_eq!(report.deltas, ReportDeltas::default());
        assert_eq!(report.estimates.len(), 1);
    }

    #[test]
    fn test_zero_source_cost_yields_no_savings_delta() {
        let estimates = [
            estimate(StoreKind::Source, 0.0),
            estimate(StoreKind::Target, 100.0),
        ];
        let report = ComparativeReport::build(None, &estimates, &[]).unwrap();
        assert_eq!(report.deltas.cost_savings_percent, None);
    }

    #[test]
    fn test_analysis_alone_is_insufficient() {
        let analysis = AnalysisReport {
            findings: Vec::new(),
            parse_incomplete: false,
            operations_seen: 10,
        };
        assert_eq!(
            ComparativeReport::build(Some(analysis), &[], &[]),
            Err(InsufficientData)
        );
    }
}
