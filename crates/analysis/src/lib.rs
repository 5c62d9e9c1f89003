// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Static access-pattern analysis.
//!
//! The analyzer consumes the pre-parsed [`Operation`] IR plus declared
//! secondary indexes and emits ranked [`AccessPatternFinding`]s for the
//! anti-patterns that matter most when moving a workload between
//! key-value stores:
//!
//! - **Hot partitions**: one key soaking up a disproportionate share of
//!   a table's traffic, which a shard-per-core store cannot spread.
//! - **Index proliferation**: each secondary index adds a full unit of
//!   write amplification under request pricing.
//! - **Fan-out**: one logical write triggering many downstream writes.
//! - **Oversized batches**: batch writes exceeding the store's limits.
//!
//! All thresholds and store limits are injected through
//! [`AnalyzerConfig`]; nothing is read from ambient state and nothing
//! here performs I/O, so identical input always produces an identical
//! report.
//!
//! [`Operation`]: migratory_core::Operation
//! [`AccessPatternFinding`]: migratory_core::AccessPatternFinding

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

mod analyzer;
mod config;

pub use analyzer::analyze;
pub use config::{AnalyzerConfig, StoreLimits};
