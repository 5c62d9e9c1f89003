// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Store connectors for the benchmark harness.
//!
//! The harness core depends only on the `Connector` trait; the
//! implementations live here, outside that boundary:
//!
//! - [`SimulatedStore`]: an in-memory store with a deterministic
//!   latency and throttling model, for demos and harness-level tests
//!   that need exact, reproducible behavior.
//! - [`HttpConnector`]: speaks the source store's JSON wire protocol
//!   subset (PutItem/GetItem/Query) against any compatible endpoint
//!   URL, whether a cloud table or a local protocol-compatible port.
//!
//! Connectors are instantiated and owned by the caller of a run and
//! passed in explicitly; nothing here holds a connection across calls.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod http;
pub mod simulated;

pub use http::HttpConnector;
pub use simulated::{LatencyModel, SimulatedStore, ThrottlePolicy};
