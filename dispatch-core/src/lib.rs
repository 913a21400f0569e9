//! Core domain types for the Dispatch routing engine.
//!
//! The crate turns a raw delivery request (travel-time matrix, vehicles and
//! jobs) into the node-indexed [`ProblemInstance`] a [`RoutingEngine`]
//! consumes, and decodes the engine's [`Assignment`] back into per-vehicle
//! job lists and durations.
//!
//! Three coordinate spaces meet here: job identity, location index (a row of
//! the caller's matrix) and node index (the engine's view, which appends one
//! synthetic terminal node so vehicles may finish anywhere). The builders in
//! this crate are the only place where those spaces are translated.
//!
//! ```
//! use dispatch_core::{SolveRequest, TimeMatrix};
//!
//! let request: SolveRequest = serde_json::from_str(
//!     r#"{"matrix": [[0, 1], [1, 0]], "vehicles": [], "jobs": []}"#,
//! )?;
//! let matrix = TimeMatrix::build(&request.matrix)?;
//! assert_eq!(matrix.size(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod decode;
mod engine;
mod error;
mod fleet;
mod jobs;
mod matrix;
mod pipeline;
mod problem;
mod request;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use decode::{SolutionReport, VehicleRoute, decode};
pub use engine::{Assignment, RoutingEngine};
pub use error::{InvalidInputError, SolveError};
pub use fleet::{Vehicle, VehiclePool};
pub use jobs::{Job, JobPool};
pub use matrix::TimeMatrix;
pub use pipeline::{solve_json, solve_request};
pub use problem::{NodeIndex, ProblemInstance};
pub use request::{JobRecord, RecordId, SolveRequest, VehicleRecord};
