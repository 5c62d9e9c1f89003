// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Deterministic in-memory store.
//!
//! The simulated store answers instantly and *claims* a latency drawn
//! from a seeded model instead of sleeping, so simulated benchmark runs
//! finish fast and reproduce exactly. Throttling and connection failure
//! are injectable for exercising the harness's degraded paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use migratory_benchmarks::{BenchError, Connector, Outcome, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Claimed-latency model: `base` plus a uniformly drawn jitter.
#[derive(Debug, Clone, Copy)]
pub struct LatencyModel {
    /// Latency floor.
    pub base: Duration,
    /// Upper bound of the uniform jitter added to `base`.
    pub jitter: Duration,
}

impl LatencyModel {
    /// A fixed latency with no jitter.
    pub fn fixed(base: Duration) -> Self {
        Self {
            base,
            jitter: Duration::ZERO,
        }
    }
}

/// When the simulated store sheds load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottlePolicy {
    /// Never throttle.
    Never,
    /// Throttle every `nth` call, counted across all operations.
    EveryNth {
        /// Period of the throttle pattern.
        nth: u64,
    },
}

/// In-memory store with deterministic behavior.
pub struct SimulatedStore {
    tables: Mutex<HashMap<String, HashMap<String, serde_json::Value>>>,
    rng: Mutex<StdRng>,
    calls: AtomicU64,
    latency: LatencyModel,
    throttle: ThrottlePolicy,
    fail_after: Option<u64>,
}

impl SimulatedStore {
    /// A healthy store with the given latency model.
    pub fn new(latency: LatencyModel, seed: u64) -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            calls: AtomicU64::new(0),
            latency,
            throttle: ThrottlePolicy::Never,
            fail_after: None,
        }
    }

    /// Set the throttle policy.
    pub fn with_throttle(mut self, throttle: ThrottlePolicy) -> Self {
        self.throttle = throttle;
        self
    }

    /// Report the store unreachable after `calls` operations.
    pub fn failing_after(mut self, calls: u64) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Number of operations served so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn elapsed(&self) -> Duration {
        let jitter_nanos = self.latency.jitter.as_nanos() as u64;
        if jitter_nanos == 0 {
            return self.latency.base;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        self.latency.base + Duration::from_nanos(rng.gen_range(0..=jitter_nanos))
    }

    /// Shared pre-checks: connection failure, then throttling.
    fn admit(&self) -> Result<Option<Outcome>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_after.is_some_and(|n| call > n) {
            return Err(BenchError::Connection(
                "simulated store marked unreachable".into(),
            ));
        }
        if let ThrottlePolicy::EveryNth { nth } = self.throttle {
            if nth > 0 && call % nth == 0 {
                return Ok(Some(Outcome::throttled(self.elapsed())));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl Connector for SimulatedStore {
    async fn put(&self, table: &str, item: serde_json::Value) -> Result<Outcome> {
        if let Some(outcome) = self.admit()? {
            return Ok(outcome);
        }
        let key = item
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.entry(table.to_string()).or_default().insert(key, item);
        Ok(Outcome::success(self.elapsed()))
    }

    async fn get(&self, table: &str, key: &str) -> Result<Outcome> {
        if let Some(outcome) = self.admit()? {
            return Ok(outcome);
        }
        let tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let hit = tables.get(table).is_some_and(|t| t.contains_key(key));
        trace!(table, key, hit, "simulated get");
        // A read miss is still a served operation.
        Ok(Outcome::success(self.elapsed()))
    }

    async fn query(&self, table: &str, condition: &str) -> Result<Outcome> {
        if let Some(outcome) = self.admit()? {
            return Ok(outcome);
        }
        let tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let matches = tables
            .get(table)
            .map(|t| t.keys().filter(|k| condition.contains(k.as_str())).count())
            .unwrap_or(0);
        trace!(table, condition, matches, "simulated query");
        Ok(Outcome::success(self.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use migratory_benchmarks::OutcomeStatus;

    use super::*;

    #[tokio::test]
    async fn test_fixed_latency_claimed_exactly() {
        let store = SimulatedStore::new(LatencyModel::fixed(Duration::from_millis(5)), 1);
        let outcome = store.get("t", "user1").await.unwrap();
        assert_eq!(outcome.elapsed, Duration::from_millis(5));
        assert_eq!(outcome.status, OutcomeStatus::Success);
    }

    #[tokio::test]
    async fn test_jitter_is_seed_deterministic() {
        let model = LatencyModel {
            base: Duration::from_millis(2),
            jitter: Duration::from_millis(8),
        };
        let a = SimulatedStore::new(model, 99);
        let b = SimulatedStore::new(model, 99);
        for _ in 0..20 {
            let left = a.get("t", "k").await.unwrap().elapsed;
            let right = b.get("t", "k").await.unwrap().elapsed;
            assert_eq!(left, right);
            assert!(left >= Duration::from_millis(2));
            assert!(left <= Duration::from_millis(10));
        }
    }

    #[tokio::test]
    async fn test_every_nth_throttle_pattern() {
        let store = SimulatedStore::new(LatencyModel::fixed(Duration::from_millis(1)), 0)
            .with_throttle(ThrottlePolicy::EveryNth { nth: 4 });
        let mut throttled = 0;
        for _ in 0..100 {
            if store.get("t", "k").await.unwrap().status == OutcomeStatus::Throttled {
                throttled += 1;
            }
        }
        assert_eq!(throttled, 25);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = SimulatedStore::new(LatencyModel::fixed(Duration::from_millis(1)), 0)
            .failing_after(2);
        assert!(store.get("t", "a").await.is_ok());
        assert!(store.get("t", "b").await.is_ok());
        let err = store.get("t", "c").await.unwrap_err();
        assert!(matches!(err, BenchError::Connection(_)));
    }

    #[tokio::test]
    async fn test_put_stores_item() {
        let store = SimulatedStore::new(LatencyModel::fixed(Duration::from_millis(1)), 0);
        let item = serde_json::json!({"id": "user7", "payload": "abc"});
        store.put("t", item).await.unwrap();
        assert_eq!(store.call_count(), 1);
        let tables = store.tables.lock().unwrap();
        assert!(tables["t"].contains_key("user7"));
    }
}
