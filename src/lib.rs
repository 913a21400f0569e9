//! Facade crate for the Dispatch routing engine.
//!
//! This crate re-exports the core request, instance and report types and,
//! behind the `solver-vrp` feature, the `vrp-core` backed engine.

#![forbid(unsafe_code)]

pub use dispatch_core::{
    Assignment, InvalidInputError, Job, JobPool, JobRecord, NodeIndex, ProblemInstance, RecordId,
    RoutingEngine, SolutionReport, SolveError, SolveRequest, TimeMatrix, Vehicle, VehiclePool,
    VehicleRecord, VehicleRoute, decode, solve_json, solve_request,
};

#[cfg(feature = "solver-vrp")]
pub use dispatch_solver_vrp::{VrpEngine, VrpEngineConfig};
