//! Fixtures shared by unit, behaviour and downstream crate tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    Assignment, JobRecord, NodeIndex, ProblemInstance, RecordId, RoutingEngine, SolveError,
    SolveRequest, VehicleRecord,
};

/// Build a job record with a single delivery dimension.
#[must_use]
pub fn job(id: &str, location_index: usize, demand: u64, service: u64) -> JobRecord {
    JobRecord {
        id: RecordId::new(id),
        location_index,
        delivery: vec![demand],
        service,
    }
}

/// Build a vehicle record with a single capacity dimension.
#[must_use]
pub fn vehicle(id: &str, start_index: usize, capacity: u64) -> VehicleRecord {
    VehicleRecord {
        id: RecordId::new(id),
        start_index,
        capacity: vec![capacity],
    }
}

/// Assemble a request from its parts.
#[must_use]
pub const fn request(
    matrix: Vec<Vec<u64>>,
    vehicles: Vec<VehicleRecord>,
    jobs: Vec<JobRecord>,
) -> SolveRequest {
    SolveRequest {
        matrix,
        vehicles,
        jobs,
    }
}

#[derive(Debug, Clone)]
enum Script {
    Routes(Vec<Vec<NodeIndex>>),
    Infeasible,
    Fail(SolveError),
}

/// `RoutingEngine` replaying a fixed outcome and counting its invocations.
#[derive(Debug)]
pub struct ScriptedEngine {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    const fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer with the given visit sequences, one per vehicle.
    #[must_use]
    pub const fn routes(routes: Vec<Vec<NodeIndex>>) -> Self {
        Self::new(Script::Routes(routes))
    }

    /// Report that no feasible assignment exists.
    #[must_use]
    pub const fn infeasible() -> Self {
        Self::new(Script::Infeasible)
    }

    /// Fail with `error`.
    #[must_use]
    pub const fn failing(error: SolveError) -> Self {
        Self::new(Script::Fail(error))
    }

    /// Number of times the engine was asked to solve.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingEngine for ScriptedEngine {
    fn solve(&self, instance: &ProblemInstance<'_>) -> Result<Option<Assignment>, SolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Routes(routes) => Assignment::from_routes(instance, routes).map(Some),
            Script::Infeasible => Ok(None),
            Script::Fail(error) => Err(error.clone()),
        }
    }
}
