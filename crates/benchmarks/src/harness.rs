// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! The run loop.
//!
//! One call to [`run`] drives one store. The caller owns the connector
//! and invokes a separate, isolated run per store; a connector failure
//! here never touches the other store's run.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use migratory_core::{BenchmarkResult, OperationKind, StoreKind};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::connector::{Connector, Outcome, OutcomeStatus};
use crate::sampler::OperationSampler;
use crate::stats::LatencySummary;
use crate::{BenchError, Result};

/// Parameters for one benchmark run.
///
/// Results from two runs are directly comparable only when both used
/// the same `operation_mix`, `total_operations`, and `concurrency`;
/// callers comparing stores reuse one config for both runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Weighted operation mix workers draw from.
    pub operation_mix: Vec<(OperationKind, u32)>,
    /// Fixed worker-pool size.
    pub concurrency: u32,
    /// Operations in the measured phase.
    pub total_operations: u64,
    /// Operations executed and discarded before measuring, letting
    /// connection pools and caches stabilize.
    pub warmup_operations: u64,
    /// Wall-clock bound on the measured phase only; warmup is exempt.
    pub timeout: Duration,
    /// Seed for the weighted sampler and key selection. Worker `i`
    /// derives `seed + i`.
    pub seed: u64,
    /// Table name driven during the run.
    pub table: String,
    /// Keys are drawn uniformly from `user0..user{key_space}`.
    pub key_space: u64,
    /// Generated payload size for write operations.
    pub payload_bytes: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            operation_mix: vec![(OperationKind::Get, 1), (OperationKind::Put, 1)],
            concurrency: 10,
            total_operations: 1_000,
            warmup_operations: 100,
            timeout: Duration::from_secs(60),
            seed: 42,
            table: "migratory_bench".to_string(),
            key_space: 1_000,
            payload_bytes: 100,
        }
    }
}

impl RunConfig {
    fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(BenchError::InvalidConfig(
                "concurrency must be at least 1".into(),
            ));
        }
        if self.total_operations == 0 {
            return Err(BenchError::InvalidConfig(
                "total_operations must be at least 1".into(),
            ));
        }
        if self.key_space == 0 {
            return Err(BenchError::InvalidConfig(
                "key_space must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Run-level counters. The only shared mutable state in the measured
/// phase; latency samples stay in per-worker buffers.
#[derive(Default)]
struct Counters {
    completed: AtomicU64,
    throttled: AtomicU64,
    failed: AtomicU64,
}

/// Drive one benchmark run against one store.
///
/// Executes the warmup phase, then spreads `total_operations` over the
/// worker pool, merges per-worker samples, and aggregates percentiles.
/// On timeout the run returns a partial result with `incomplete`
/// set; it fails only when the config is invalid or the connector
/// cannot reach its store at all.
pub async fn run(
    store: StoreKind,
    connector: Arc<dyn Connector>,
    config: &RunConfig,
) -> Result<BenchmarkResult> {
    config.validate()?;
    let sampler = Arc::new(OperationSampler::new(&config.operation_mix)?);
    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        store = store.as_str(),
        total_operations = config.total_operations,
        concurrency = config.concurrency,
        "starting benchmark run"
    );

    warmup(connector.as_ref(), &sampler, config).await?;

    let counters = Arc::new(Counters::default());
    let token = CancellationToken::new();

    let timer = {
        let token = token.clone();
        let timeout = config.timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            token.cancel();
        })
    };

    let start = Instant::now();
    let mut handles = Vec::with_capacity(config.concurrency as usize);
    for worker_index in 0..u64::from(config.concurrency) {
        let ops = per_worker_ops(config.total_operations, config.concurrency, worker_index);
        handles.push(tokio::spawn(worker(
            connector.clone(),
            sampler.clone(),
            counters.clone(),
            token.clone(),
            config.clone(),
            worker_index,
            ops,
        )));
    }

    let joined = futures::future::join_all(handles).await;
    let wall = start.elapsed();
    timer.abort();

    let mut samples = Vec::with_capacity(config.total_operations as usize);
    let mut connection_error = None;
    for join_result in joined {
        match join_result {
            Ok(Ok(worker_samples)) => samples.extend(worker_samples),
            Ok(Err(err)) => connection_error = Some(err),
            Err(err) => return Err(BenchError::Join(err.to_string())),
        }
    }
    if let Some(err) = connection_error {
        return Err(err);
    }

    let completed = counters.completed.load(Ordering::Relaxed);
    let incomplete = completed < config.total_operations;
    if incomplete {
        warn!(
            %run_id,
            completed,
            total = config.total_operations,
            "run timed out, returning partial result"
        );
    }
    let summary = LatencySummary::from_samples(&mut samples);
    let throughput = if wall.as_secs_f64() > 0.0 {
        completed as f64 / wall.as_secs_f64()
    } else {
        0.0
    };

    Ok(BenchmarkResult {
        run_id,
        store,
        p50: summary.p50,
        p95: summary.p95,
        p99: summary.p99,
        throughput_ops_per_sec: throughput,
        throttled_count: counters.throttled.load(Ordering::Relaxed),
        failed_count: counters.failed.load(Ordering::Relaxed),
        completed_count: completed,
        incomplete,
        timestamp: Utc::now(),
    })
}

/// Evenly distribute operations; the remainder goes to the first workers.
fn per_worker_ops(total: u64, concurrency: u32, worker_index: u64) -> u64 {
    let concurrency = u64::from(concurrency);
    total / concurrency + u64::from(worker_index < total % concurrency)
}

/// Warmup is single-stream and unbounded by the run timeout; its
/// samples are discarded. A connector that cannot serve warmup cannot
/// serve the measured phase either, so errors propagate.
async fn warmup(
    connector: &dyn Connector,
    sampler: &OperationSampler,
    config: &RunConfig,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(u64::from(u32::MAX)));
    for _ in 0..config.warmup_operations {
        let kind = sampler.sample(&mut rng);
        execute(connector, kind, config, &mut rng).await?;
    }
    debug!(operations = config.warmup_operations, "warmup complete");
    Ok(())
}

async fn worker(
    connector: Arc<dyn Connector>,
    sampler: Arc<OperationSampler>,
    counters: Arc<Counters>,
    token: CancellationToken,
    config: RunConfig,
    worker_index: u64,
    operations: u64,
) -> Result<Vec<Duration>> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(worker_index));
    let mut samples = Vec::with_capacity(operations as usize);

    for _ in 0..operations {
        if token.is_cancelled() {
            break;
        }
        let kind = sampler.sample(&mut rng);
        let outcome = tokio::select! {
            result = execute(connector.as_ref(), kind, &config, &mut rng) => match result {
                Ok(outcome) => outcome,
                Err(err) => {
                    // Unreachable store: stop peers, fail this run.
                    token.cancel();
                    return Err(err);
                }
            },
            // In-flight operation abandoned, not retried.
            () = token.cancelled() => break,
        };
        record(&counters, &mut samples, outcome);
    }
    Ok(samples)
}

fn record(counters: &Counters, samples: &mut Vec<Duration>, outcome: Outcome) {
    counters.completed.fetch_add(1, Ordering::Relaxed);
    match outcome.status {
        OutcomeStatus::Success => samples.push(outcome.elapsed),
        OutcomeStatus::Throttled => {
            counters.throttled.fetch_add(1, Ordering::Relaxed);
        }
        OutcomeStatus::Failed => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
        }
    }
}

async fn execute(
    connector: &dyn Connector,
    kind: OperationKind,
    config: &RunConfig,
    rng: &mut StdRng,
) -> Result<Outcome> {
    let key = format!("user{}", rng.gen_range(0..config.key_space));
    match kind {
        OperationKind::Get => connector.get(&config.table, &key).await,
        OperationKind::Query => {
            let condition = format!("id = {key}");
            connector.query(&config.table, &condition).await
        }
        // The connector capability set is put/get/query; batched and
        // transactional kinds in a mix degrade to single puts.
        OperationKind::Put | OperationKind::BatchWrite | OperationKind::TransactWrite => {
            let payload: String = rng
                .sample_iter(&Alphanumeric)
                .take(config.payload_bytes)
                .map(char::from)
                .collect();
            let item = serde_json::json!({ "id": key, "payload": payload });
            connector.put(&config.table, item).await
        }
    }
}
