// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared data model for the Migratory migration advisor.
//!
//! This crate defines the typed intermediate representation every other
//! Migratory crate computes over: declared operations and secondary
//! indexes, access-pattern findings, workload profiles and their named
//! templates, cost estimates, benchmark results, and the comparative
//! report that merges them.
//!
//! Everything here is plain serializable data. No I/O, no clocks beyond
//! result timestamps, no process-wide state: each value is created fresh
//! per invocation and owned by its caller.
//!
//! # Modules
//!
//! - [`operation`] - The pre-parsed operation and index IR
//! - [`finding`] - Access-pattern findings and the analysis report
//! - [`profile`] - Workload profiles and validation
//! - [`templates`] - Named workload presets
//! - [`cost`] - Per-store cost estimates
//! - [`bench`] - Benchmark run results
//! - [`report`] - Comparative report assembly

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod bench;
pub mod cost;
pub mod finding;
pub mod operation;
pub mod profile;
pub mod report;
pub mod templates;

pub use bench::BenchmarkResult;
pub use cost::{CostBreakdown, CostEstimate, StoreKind};
pub use finding::{AccessPatternFinding, AnalysisReport, FindingKind, Severity};
pub use operation::{IndexDeclaration, Operation, OperationKind, ProjectionType};
pub use profile::{ProfileOverrides, ValidationError, WorkloadProfile};
pub use report::{ComparativeReport, InsufficientData, ReportDeltas};
pub use templates::WorkloadTemplate;
