//! Native routing engine for Dispatch.
//!
//! This crate provides [`VrpEngine`], the production implementation of the
//! [`RoutingEngine`](dispatch_core::RoutingEngine) trait. Every visit node of a
//! [`ProblemInstance`](dispatch_core::ProblemInstance) becomes a `vrp-core`
//! delivery job carrying the pooled demand, every vehicle a `vrp-core` vehicle
//! running from its start node to the terminal node, and the transport cost
//! is the instance's arc cost (travel plus service at the destination).
//!
//! The search stops at the instance's time budget or the configured
//! generation limit, whichever comes first. Engine modelling errors are
//! reported as invalid input; a solution with unassigned jobs is reported as
//! "no assignment".

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod vrp;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use engine::{VrpEngine, VrpEngineConfig};
