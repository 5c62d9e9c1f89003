// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! The store-facing capability boundary.
//!
//! The harness depends on nothing but this trait: any store reachable
//! through `put`/`get`/`query` returning an [`Outcome`] is usable,
//! whether local, cloud-hosted, or a protocol-compatible emulation
//! endpoint. Connector instances are created and owned by the caller of
//! a run; the harness never holds a connection across calls.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// How one operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The store served the operation.
    Success,
    /// The store shed the operation. Expected under request pricing;
    /// counted, never retried by the harness.
    Throttled,
    /// The operation failed for any other reason.
    Failed,
}

/// Per-operation result reported by a connector.
///
/// `elapsed` is measured by the connector itself, which is what lets
/// deterministic fake connectors produce exact expected percentiles in
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Round-trip time of the operation.
    pub elapsed: Duration,
    /// How the operation ended.
    pub status: OutcomeStatus,
}

impl Outcome {
    /// A successful outcome with the given round-trip time.
    pub fn success(elapsed: Duration) -> Self {
        Self {
            elapsed,
            status: OutcomeStatus::Success,
        }
    }

    /// A throttled outcome with the given round-trip time.
    pub fn throttled(elapsed: Duration) -> Self {
        Self {
            elapsed,
            status: OutcomeStatus::Throttled,
        }
    }

    /// A failed outcome with the given round-trip time.
    pub fn failed(elapsed: Duration) -> Self {
        Self {
            elapsed,
            status: OutcomeStatus::Failed,
        }
    }
}

/// Minimal capability set a benchmarkable store must expose.
///
/// Implementations live outside the harness (see the
/// `migratory-adapters` crate). An `Err` from any method means the
/// store is unreachable and fails the run; per-operation problems are
/// `Ok` outcomes with a non-success status.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Write one item.
    async fn put(&self, table: &str, item: serde_json::Value) -> Result<Outcome>;

    /// Point-read one item by key.
    async fn get(&self, table: &str, key: &str) -> Result<Outcome>;

    /// Partition-scoped range read.
    async fn query(&self, table: &str, condition: &str) -> Result<Outcome>;
}
