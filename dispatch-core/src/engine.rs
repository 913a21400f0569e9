//! Routing engine boundary and the assignment it produces.

use crate::{NodeIndex, ProblemInstance, SolveError};

/// Per-vehicle successor function returned by a [`RoutingEngine`].
///
/// `successor(node, vehicle)` is defined on every node of the vehicle's route
/// except its end node. The decoder checks that the successors form one
/// simple path per vehicle covering every visit node exactly once.
///
/// # Examples
/// ```
/// use dispatch_core::Assignment;
///
/// let assignment = Assignment::from_successors(vec![vec![Some(1), Some(2), None]]);
/// assert_eq!(assignment.successor(0, 0), Some(1));
/// assert_eq!(assignment.successor(2, 0), None);
/// assert_eq!(assignment.successor(0, 3), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    next: Vec<Vec<Option<NodeIndex>>>,
}

impl Assignment {
    /// Wrap raw successor tables, one per vehicle, indexed by node.
    #[must_use]
    pub const fn from_successors(next: Vec<Vec<Option<NodeIndex>>>) -> Self {
        Self { next }
    }

    /// Build an assignment from visit sequences, one per vehicle.
    ///
    /// Each sequence lists the visited nodes between the vehicle's start and
    /// end, which are added implicitly.
    ///
    /// # Errors
    /// [`SolveError::Internal`] when the number of sequences differs from the
    /// vehicle count or a sequence names a node outside the instance.
    pub fn from_routes(
        instance: &ProblemInstance<'_>,
        routes: &[Vec<NodeIndex>],
    ) -> Result<Self, SolveError> {
        if routes.len() != instance.vehicle_count() {
            return Err(SolveError::Internal(format!(
                "engine returned {} routes for {} vehicles",
                routes.len(),
                instance.vehicle_count()
            )));
        }
        let node_count = instance.node_count();
        let mut next = Vec::with_capacity(routes.len());
        for (vehicle, route) in instance.vehicles().vehicles().iter().zip(routes) {
            let mut successors = vec![None; node_count];
            let mut current = vehicle.start;
            for &node in route.iter().chain(std::iter::once(&vehicle.end)) {
                let slot = successors.get_mut(current).ok_or_else(|| {
                    SolveError::Internal(format!(
                        "vehicle {} routed through unknown node {current}",
                        vehicle.id
                    ))
                })?;
                *slot = Some(node);
                current = node;
            }
            next.push(successors);
        }
        Ok(Self { next })
    }

    /// Node visited after `node` by `vehicle`, if any.
    #[must_use]
    pub fn successor(&self, node: NodeIndex, vehicle: usize) -> Option<NodeIndex> {
        self.next
            .get(vehicle)
            .and_then(|successors| successors.get(node))
            .copied()
            .flatten()
    }

    /// Number of vehicles covered by the assignment.
    #[must_use]
    pub const fn vehicle_count(&self) -> usize {
        self.next.len()
    }
}

/// Searches for a capacity-feasible assignment of an instance.
///
/// Implementations build initial routes by cheapest insertion, improve them
/// by local search and stop within [`ProblemInstance::time_budget`]. They
/// must return either a complete assignment or `None`, never a partial one.
///
/// # Examples
/// ```
/// use dispatch_core::{Assignment, ProblemInstance, RoutingEngine, SolveError};
///
/// struct Direct;
///
/// impl RoutingEngine for Direct {
///     fn solve(&self, instance: &ProblemInstance<'_>) -> Result<Option<Assignment>, SolveError> {
///         let routes = vec![Vec::new(); instance.vehicle_count()];
///         Assignment::from_routes(instance, &routes).map(Some)
///     }
/// }
/// ```
pub trait RoutingEngine: Send + Sync {
    /// Solve `instance`.
    ///
    /// # Errors
    /// [`SolveError::InvalidInput`] when the engine cannot model the
    /// instance and [`SolveError::Internal`] for engine failures.
    fn solve(&self, instance: &ProblemInstance<'_>) -> Result<Option<Assignment>, SolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{job, vehicle};
    use crate::{JobPool, TimeMatrix, VehiclePool};
    use rstest::rstest;

    #[rstest]
    fn routes_chain_start_to_terminal() {
        let matrix = TimeMatrix::build(&vec![vec![0; 4]; 4]).expect("square matrix");
        let jobs = JobPool::build(&[job("a", 1, 1, 0)], matrix.size()).expect("jobs");
        let vehicles = VehiclePool::build(&[vehicle("v1", 0, 5), vehicle("v2", 3, 5)], 5)
            .expect("fleet");
        let instance = ProblemInstance::build(&matrix, &vehicles, &jobs).expect("instance");

        let assignment =
            Assignment::from_routes(&instance, &[vec![2, 1], Vec::new()]).expect("assignment");
        assert_eq!(assignment.successor(0, 0), Some(2));
        assert_eq!(assignment.successor(2, 0), Some(1));
        assert_eq!(assignment.successor(1, 0), Some(4));
        assert_eq!(assignment.successor(4, 0), None);
        assert_eq!(assignment.successor(3, 1), Some(4));
        assert_eq!(assignment.vehicle_count(), 2);
    }

    #[rstest]
    fn rejects_route_count_mismatch() {
        let matrix = TimeMatrix::build(&vec![vec![0; 2]; 2]).expect("square matrix");
        let jobs = JobPool::build(&[], matrix.size()).expect("jobs");
        let vehicles = VehiclePool::build(&[vehicle("v1", 0, 5)], 3).expect("fleet");
        let instance = ProblemInstance::build(&matrix, &vehicles, &jobs).expect("instance");

        let err = Assignment::from_routes(&instance, &[]).expect_err("missing route");
        assert!(matches!(err, SolveError::Internal(_)));
    }

    #[rstest]
    fn rejects_unknown_node() {
        let matrix = TimeMatrix::build(&vec![vec![0; 2]; 2]).expect("square matrix");
        let jobs = JobPool::build(&[], matrix.size()).expect("jobs");
        let vehicles = VehiclePool::build(&[vehicle("v1", 0, 5)], 3).expect("fleet");
        let instance = ProblemInstance::build(&matrix, &vehicles, &jobs).expect("instance");

        let err = Assignment::from_routes(&instance, &[vec![9, 1]]).expect_err("unknown node");
        assert!(matches!(err, SolveError::Internal(_)));
    }
}
