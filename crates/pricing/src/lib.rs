// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Comparative cost modeling.
//!
//! Turns a [`WorkloadProfile`] into a monthly [`CostEstimate`] under two
//! pricing strategies:
//!
//! - **Request pricing** (source store): pay per read and write unit,
//!   with every secondary index adding one full unit of write
//!   amplification, plus per-GB storage.
//! - **Infrastructure pricing** (target store): pay for the node count
//!   needed to absorb peak throughput; storage rides along on the
//!   nodes, with a materialized-view overhead factor standing in for
//!   separately-billed indexes.
//!
//! Strategies are pure functions of `(profile, constants)`: no network,
//! no disk, no clocks. Estimates for the two stores are computed
//! independently with no shared state.
//!
//! [`WorkloadProfile`]: migratory_core::WorkloadProfile
//! [`CostEstimate`]: migratory_core::CostEstimate

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

mod constants;
mod strategy;

pub use constants::{InfrastructurePricing, PricingConstants, RequestPricing, SECONDS_PER_MONTH};
pub use strategy::{estimate, InfrastructureStrategy, PricingStrategy, RequestStrategy};
