//! Translate an engine assignment back into job lists and durations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Assignment, NodeIndex, ProblemInstance, RecordId, SolveError};

/// Route of one vehicle in a solution report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRoute {
    /// Delivered job ids in visiting order.
    pub jobs: Vec<RecordId>,
    /// Travel plus service time of the route.
    pub delivery_duration: u64,
}

/// Decoded solution, serialized as the response body.
///
/// Routes are keyed by vehicle id in a sorted map so identical inputs
/// serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// Sum of every vehicle's delivery duration.
    pub total_delivery_duration: u64,
    /// Route per vehicle id, including vehicles that stay idle.
    pub routes: BTreeMap<RecordId, VehicleRoute>,
}

/// Decode `assignment` for `instance`.
///
/// Each vehicle's successor chain is followed from its start to the terminal
/// node. Jobs located at a start node are reported for the vehicle owning
/// that start.
///
/// # Errors
/// [`SolveError::Internal`] when the assignment is malformed: a missing
/// successor, a cycle, a node outside the instance, a start node visited by
/// another vehicle, or a visit node served zero or several times.
///
/// # Examples
/// ```
/// use dispatch_core::{Assignment, JobPool, JobRecord, ProblemInstance, RecordId};
/// use dispatch_core::{TimeMatrix, VehiclePool, VehicleRecord, decode};
///
/// let matrix = TimeMatrix::build(&[vec![0, 7], vec![7, 0]])?;
/// let jobs = JobPool::build(
///     &[JobRecord { id: RecordId::new("j"), location_index: 1, delivery: vec![1], service: 3 }],
///     matrix.size(),
/// )?;
/// let vehicles = VehiclePool::build(
///     &[VehicleRecord { id: RecordId::new("v"), start_index: 0, capacity: vec![1] }],
///     matrix.size(),
/// )?;
/// let instance = ProblemInstance::build(&matrix, &vehicles, &jobs)?;
/// let assignment = Assignment::from_routes(&instance, &[vec![1]])?;
/// let report = decode(&instance, &assignment)?;
/// assert_eq!(report.total_delivery_duration, 10);
/// assert_eq!(report.routes[&RecordId::new("v")].jobs, [RecordId::new("j")]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode(
    instance: &ProblemInstance<'_>,
    assignment: &Assignment,
) -> Result<SolutionReport, SolveError> {
    let mut served = vec![0_u32; instance.node_count()];
    let mut routes = BTreeMap::new();
    let mut total = 0_u64;

    for (index, vehicle) in instance.vehicles().vehicles().iter().enumerate() {
        let route = follow(instance, assignment, index, &mut served)?;
        total = total.checked_add(route.delivery_duration).ok_or_else(|| {
            SolveError::internal("total delivery duration overflows")
        })?;
        routes.insert(vehicle.id.clone(), route);
    }

    if let Some(node) = instance
        .visit_nodes()
        .into_iter()
        .find(|node| served.get(*node).copied() != Some(1))
    {
        return Err(SolveError::Internal(format!(
            "visit node {node} is not served exactly once"
        )));
    }

    log::debug!(
        "decoded {} routes with total delivery duration {total}",
        routes.len()
    );
    Ok(SolutionReport {
        total_delivery_duration: total,
        routes,
    })
}

fn follow(
    instance: &ProblemInstance<'_>,
    assignment: &Assignment,
    vehicle: usize,
    served: &mut [u32],
) -> Result<VehicleRoute, SolveError> {
    let jobs = instance.jobs();
    let fleet = instance.vehicles();
    let Some(owner) = fleet.get(vehicle) else {
        return Err(SolveError::Internal(format!("unknown vehicle {vehicle}")));
    };

    let mut route = VehicleRoute {
        jobs: Vec::new(),
        delivery_duration: 0,
    };
    if fleet.owns_start(vehicle) {
        route.jobs.extend_from_slice(jobs.jobs_at(owner.start));
    }

    let mut visited = vec![false; instance.node_count()];
    let mut current: NodeIndex = owner.start;
    mark(&mut visited, current, &owner.id)?;
    while current != owner.end {
        let next = assignment.successor(current, vehicle).ok_or_else(|| {
            SolveError::Internal(format!(
                "vehicle {} has no successor after node {current}",
                owner.id
            ))
        })?;
        mark(&mut visited, next, &owner.id)?;
        if next != owner.end {
            if !instance.is_visit_node(next) {
                return Err(SolveError::Internal(format!(
                    "vehicle {} visits start node {next}",
                    owner.id
                )));
            }
            if let Some(count) = served.get_mut(next) {
                *count = count.saturating_add(1);
            }
            route.jobs.extend_from_slice(jobs.jobs_at(next));
        }
        route.delivery_duration = route
            .delivery_duration
            .checked_add(instance.cost(current, next))
            .ok_or_else(|| {
                SolveError::Internal(format!("route of vehicle {} overflows", owner.id))
            })?;
        current = next;
    }
    Ok(route)
}

fn mark(visited: &mut [bool], node: NodeIndex, vehicle: &RecordId) -> Result<(), SolveError> {
    match visited.get_mut(node) {
        None => Err(SolveError::Internal(format!(
            "vehicle {vehicle} visits unknown node {node}"
        ))),
        Some(true) => Err(SolveError::Internal(format!(
            "vehicle {vehicle} revisits node {node}"
        ))),
        Some(seen) => {
            *seen = true;
            Ok(())
        }
    }
}
