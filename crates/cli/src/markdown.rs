//! Markdown rendering of core output.
//!
//! The core emits structured data only; turning it into something a
//! human skims happens here.

use std::fmt::Write;

use migratory_core::{AnalysisReport, BenchmarkResult, ComparativeReport, CostEstimate};

/// Render an analysis report as a markdown section.
pub fn render_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    writeln!(out, "## Access-pattern findings").unwrap();
    writeln!(out).unwrap();
    if report.parse_incomplete {
        writeln!(out, "> Input was empty or uninterpretable; findings are partial.").unwrap();
        writeln!(out).unwrap();
    }
    if report.findings.is_empty() {
        writeln!(out, "No anti-patterns detected over {} operations.", report.operations_seen)
            .unwrap();
        return out;
    }
    writeln!(out, "| Severity | Kind | Table | Key | Recommendation |").unwrap();
    writeln!(out, "|----------|------|-------|-----|----------------|").unwrap();
    for finding in &report.findings {
        writeln!(
            out,
            "| {:?} | {} | {} | {} | {} |",
            finding.severity,
            finding.kind.as_str(),
            finding.table,
            finding.key.as_deref().unwrap_or("-"),
            finding.recommendation
        )
        .unwrap();
    }
    out
}

/// Render cost estimates as a markdown table.
pub fn render_estimates(estimates: &[CostEstimate]) -> String {
    let mut out = String::new();
    writeln!(out, "## Monthly cost estimates").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "| Store | Total (USD) | Reads | Writes | Storage | Index overhead |").unwrap();
    writeln!(out, "|-------|-------------|-------|--------|---------|----------------|").unwrap();
    for estimate in estimates {
        let b = estimate.breakdown;
        writeln!(
            out,
            "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
            estimate.store.as_str(),
            estimate.monthly_cost_usd,
            b.reads,
            b.writes,
            b.storage,
            b.index_overhead
        )
        .unwrap();
    }
    out
}

/// Render benchmark results as a markdown table.
pub fn render_results(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    writeln!(out, "## Benchmark results").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "| Store | p50 | p95 | p99 | Throughput (ops/s) | Throttled | Failed | Completed | Partial |"
    )
    .unwrap();
    writeln!(
        out,
        "|-------|-----|-----|-----|--------------------|-----------|--------|-----------|---------|"
    )
    .unwrap();
    for result in results {
        writeln!(
            out,
            "| {} | {:.2?} | {:.2?} | {:.2?} | {:.1} | {} | {} | {} | {} |",
            result.store.as_str(),
            result.p50,
            result.p95,
            result.p99,
            result.throughput_ops_per_sec,
            result.throttled_count,
            result.failed_count,
            result.completed_count,
            if result.incomplete { "yes" } else { "no" }
        )
        .unwrap();
    }
    out
}

/// Render the full comparative report.
pub fn render_report(report: &ComparativeReport) -> String {
    let mut out = String::new();
    writeln!(out, "# Migration advisory report").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Generated: {}", report.generated_at.to_rfc3339()).unwrap();
    writeln!(out).unwrap();

    if let Some(analysis) = &report.analysis {
        out.push_str(&render_analysis(analysis));
        writeln!(out).unwrap();
    }
    if !report.estimates.is_empty() {
        out.push_str(&render_estimates(&report.estimates));
        writeln!(out).unwrap();
    }
    if !report.results.is_empty() {
        out.push_str(&render_results(&report.results));
        writeln!(out).unwrap();
    }

    writeln!(out, "## Deltas").unwrap();
    writeln!(out).unwrap();
    match report.deltas.cost_savings_percent {
        Some(pct) => writeln!(out, "- Cost savings: {pct:.1}%").unwrap(),
        None => writeln!(out, "- Cost savings: n/a (need both estimates)").unwrap(),
    }
    match report.deltas.latency_improvement_ratio {
        Some(ratio) => writeln!(out, "- p99 latency improvement: {ratio:.2}x").unwrap(),
        None => writeln!(out, "- p99 latency improvement: n/a (need both results)").unwrap(),
    }
    match report.deltas.throughput_improvement_ratio {
        Some(ratio) => writeln!(out, "- Throughput improvement: {ratio:.2}x").unwrap(),
        None => writeln!(out, "- Throughput improvement: n/a (need both results)").unwrap(),
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use migratory_core::{CostBreakdown, ReportDeltas, StoreKind};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_render_estimates_table() {
        let estimates = vec![CostEstimate {
            store: StoreKind::Source,
            monthly_cost_usd: 1234.5,
            breakdown: CostBreakdown {
                reads: 200.0,
                writes: 1000.0,
                storage: 34.5,
                index_overhead: 500.0,
            },
        }];
        let md = render_estimates(&estimates);
        assert!(md.contains("| source | 1234.50 |"));
    }

    #[test]
    fn test_render_report_with_deltas() {
        let report = ComparativeReport {
            analysis: None,
            estimates: Vec::new(),
            results: vec![BenchmarkResult {
                run_id: Uuid::new_v4(),
                store: StoreKind::Target,
                p50: Duration::from_millis(2),
                p95: Duration::from_millis(4),
                p99: Duration::from_millis(6),
                throughput_ops_per_sec: 5000.0,
                throttled_count: 0,
                failed_count: 0,
                completed_count: 1000,
                incomplete: false,
                timestamp: Utc::now(),
            }],
            deltas: ReportDeltas {
                cost_savings_percent: Some(62.5),
                latency_improvement_ratio: None,
                throughput_improvement_ratio: None,
            },
            generated_at: Utc::now(),
        };
        let md = render_report(&report);
        assert!(md.contains("# Migration advisory report"));
        assert!(md.contains("Cost savings: 62.5%"));
        assert!(md.contains("n/a (need both results)"));
    }
}
