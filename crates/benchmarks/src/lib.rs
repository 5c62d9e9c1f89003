// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Concurrent benchmark harness.
//!
//! Drives controlled load against a [`Connector`] and aggregates the
//! observed latencies into a
//! [`BenchmarkResult`](migratory_core::BenchmarkResult):
//!
//! - a warmup phase whose samples are discarded,
//! - a measured phase spread over a fixed pool of workers, each drawing
//!   operation kinds from a seeded weighted sampler and buffering its
//!   latency samples privately,
//! - nearest-rank percentiles over the merged successful samples.
//!
//! Runs degrade gracefully: a timeout abandons in-flight operations and
//! returns a partial result flagged `incomplete` rather than failing.
//! Throttled outcomes are counted, never retried; retry policy belongs
//! to the connector. Only a connector that cannot reach its store at
//! all fails the run, and that failure is scoped to this run; the
//! other store's run is a separate, isolated call.
//!
//! # Modules
//!
//! - [`connector`] - The store-facing capability boundary
//! - [`harness`] - The run loop
//! - [`sampler`] - Seeded weighted operation-kind selection
//! - [`stats`] - Nearest-rank percentile computation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod connector;
pub mod harness;
pub mod sampler;
pub mod stats;

pub use connector::{Connector, Outcome, OutcomeStatus};
pub use harness::{run, RunConfig};
pub use sampler::OperationSampler;
pub use stats::{nearest_rank, LatencySummary};

use thiserror::Error;

/// Harness-level failures.
///
/// Throttling is not here on purpose: it is a counted outcome of live
/// load, not an error.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The connector cannot reach its store. Scoped to this run only.
    #[error("connector cannot reach its store: {0}")]
    Connection(String),

    /// The run configuration is malformed; nothing was executed.
    #[error("invalid run config: {0}")]
    InvalidConfig(String),

    /// A worker task failed to join.
    #[error("worker task failed: {0}")]
    Join(String),
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, BenchError>;
