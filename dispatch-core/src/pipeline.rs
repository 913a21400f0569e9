//! End-to-end handling of one routing request.
//!
//! A request moves through `Received -> Validated -> Assembled -> Solving`
//! and ends in exactly one of `Decoded`, `Infeasible`, `InvalidInput` or
//! `InternalError`. Nothing is retried and nothing outlives the call.

use crate::{
    InvalidInputError, JobPool, ProblemInstance, RoutingEngine, SolutionReport, SolveError,
    SolveRequest, TimeMatrix, VehiclePool, decode,
};

/// Parse a raw JSON payload and solve it with `engine`.
///
/// # Errors
/// [`SolveError::InvalidInput`] when the payload is not a well-formed
/// request; otherwise as [`solve_request`].
pub fn solve_json(payload: &[u8], engine: &dyn RoutingEngine) -> Result<SolutionReport, SolveError> {
    let request: SolveRequest = serde_json::from_slice(payload)
        .map_err(|err| InvalidInputError::Malformed(err.to_string()))?;
    solve_request(&request, engine)
}

/// Validate, assemble, solve and decode `request`.
///
/// # Errors
/// [`SolveError::InvalidInput`] for structural failures,
/// [`SolveError::NoSolution`] when no capacity-feasible assignment exists and
/// [`SolveError::Internal`] when the engine misbehaves.
pub fn solve_request(
    request: &SolveRequest,
    engine: &dyn RoutingEngine,
) -> Result<SolutionReport, SolveError> {
    log::debug!(
        "received request: {} locations, {} vehicles, {} jobs",
        request.matrix.len(),
        request.vehicles.len(),
        request.jobs.len()
    );

    let matrix = TimeMatrix::build(&request.matrix)?;
    let jobs = JobPool::build(&request.jobs, matrix.size())?;
    let vehicles = VehiclePool::build(&request.vehicles, matrix.size())?;
    log::debug!("validated request over {} nodes", matrix.size());

    let instance = ProblemInstance::build(&matrix, &vehicles, &jobs)?;
    log::debug!(
        "assembled instance with {} visit nodes",
        instance.visit_nodes().len()
    );

    if let Some(reason) = capacity_shortfall(&instance) {
        log::debug!("infeasible before solving: {reason}");
        return Err(SolveError::NoSolution);
    }

    log::debug!(
        "solving with a budget of {}s",
        instance.time_budget().as_secs()
    );
    let Some(assignment) = engine.solve(&instance)? else {
        log::debug!("engine found no feasible assignment");
        return Err(SolveError::NoSolution);
    };

    let report = decode(&instance, &assignment)?;
    log::debug!("decoded {} routes", report.routes.len());
    Ok(report)
}

/// Reason the fleet cannot carry the demand, if any.
fn capacity_shortfall(instance: &ProblemInstance<'_>) -> Option<String> {
    let vehicles = instance.vehicles();
    let total_demand = instance.jobs().total_demand();
    let total_capacity = vehicles.total_capacity();
    if total_demand > total_capacity {
        return Some(format!(
            "total demand {total_demand} exceeds total capacity {total_capacity}"
        ));
    }

    for (index, vehicle) in vehicles.vehicles().iter().enumerate() {
        let load = instance.start_load(index);
        if load > vehicle.capacity {
            return Some(format!(
                "vehicle {} cannot carry the {load} units at its start",
                vehicle.id
            ));
        }
    }

    let largest = vehicles
        .vehicles()
        .iter()
        .map(|vehicle| vehicle.capacity)
        .max()
        .unwrap_or(0);
    instance
        .visit_nodes()
        .into_iter()
        .find(|node| instance.demand(*node) > largest)
        .map(|node| {
            format!(
                "demand {} at node {node} exceeds every vehicle capacity",
                instance.demand(node)
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedEngine, job, request, vehicle};
    use rstest::rstest;

    #[rstest]
    fn single_job_is_routed() {
        let request = request(
            vec![vec![0, 10], vec![10, 0]],
            vec![vehicle("1", 0, 5)],
            vec![job("1", 1, 1, 5)],
        );
        let engine = ScriptedEngine::routes(vec![vec![1]]);
        let report = solve_request(&request, &engine).expect("solved");
        assert_eq!(report.total_delivery_duration, 15);
        assert_eq!(engine.calls(), 1);
    }

    #[rstest]
    fn non_square_matrix_is_invalid_input() {
        let request = request(
            vec![vec![0, 1], vec![1]],
            vec![vehicle("1", 0, 5)],
            Vec::new(),
        );
        let engine = ScriptedEngine::routes(Vec::new());
        let err = solve_request(&request, &engine).expect_err("invalid");
        assert!(matches!(
            err,
            SolveError::InvalidInput(InvalidInputError::NonSquareMatrix { row: 1, .. })
        ));
        assert_eq!(engine.calls(), 0);
    }

    #[rstest]
    #[case::total(vec![job("a", 1, 1, 0), job("b", 2, 1, 0)], vec![vehicle("1", 0, 1)])]
    #[case::shared_location(vec![job("a", 1, 2, 0), job("b", 1, 2, 0)], vec![vehicle("1", 0, 3)])]
    #[case::single_node(
        vec![job("a", 1, 3, 0)],
        vec![vehicle("1", 0, 2), vehicle("2", 0, 2)]
    )]
    #[case::start_node(
        vec![job("a", 0, 3, 0)],
        vec![vehicle("1", 0, 2), vehicle("2", 1, 2)]
    )]
    fn capacity_shortfall_skips_engine(
        #[case] jobs: Vec<crate::JobRecord>,
        #[case] vehicles: Vec<crate::VehicleRecord>,
    ) {
        let request = request(
            vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]],
            vehicles,
            jobs,
        );
        let engine = ScriptedEngine::routes(vec![vec![1, 2]]);
        let err = solve_request(&request, &engine).expect_err("infeasible");
        assert_eq!(err, SolveError::NoSolution);
        assert_eq!(engine.calls(), 0);
    }

    #[rstest]
    fn engine_without_assignment_is_no_solution() {
        let request = request(
            vec![vec![0, 1], vec![1, 0]],
            vec![vehicle("1", 0, 5)],
            vec![job("1", 1, 1, 0)],
        );
        let engine = ScriptedEngine::infeasible();
        let err = solve_request(&request, &engine).expect_err("no solution");
        assert_eq!(err, SolveError::NoSolution);
    }

    #[rstest]
    fn engine_failure_is_propagated() {
        let request = request(
            vec![vec![0, 1], vec![1, 0]],
            vec![vehicle("1", 0, 5)],
            vec![job("1", 1, 1, 0)],
        );
        let engine = ScriptedEngine::failing(SolveError::internal("engine crashed"));
        let err = solve_request(&request, &engine).expect_err("failure");
        assert_eq!(err, SolveError::Internal("engine crashed".to_owned()));
    }

    #[rstest]
    #[case::not_json(b"not json".as_slice())]
    #[case::missing_jobs(br#"{"matrix": [[0]], "vehicles": []}"#.as_slice())]
    #[case::null_id(
        br#"{"matrix": [[0]], "vehicles": [{"id": null, "start_index": 0, "capacity": [1]}], "jobs": []}"#
            .as_slice()
    )]
    fn malformed_json_is_invalid_input(#[case] payload: &[u8]) {
        let engine = ScriptedEngine::routes(Vec::new());
        let err = solve_json(payload, &engine).expect_err("malformed");
        assert!(matches!(
            err,
            SolveError::InvalidInput(InvalidInputError::Malformed(_))
        ));
    }
}
