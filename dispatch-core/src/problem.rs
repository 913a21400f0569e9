//! Node-indexed problem handed to a routing engine.

use std::time::Duration;

use crate::{InvalidInputError, JobPool, TimeMatrix, VehiclePool};

/// Index of a node in the augmented matrix.
pub type NodeIndex = usize;

/// Nodes per second of search budget.
const NODES_PER_BUDGET_SECOND: usize = 500;

/// Read-only routing problem assembled from the validated request parts.
///
/// The instance borrows the matrix and both pools, so it lives no longer than
/// the request that produced them. Evaluators are plain lookups over that
/// borrowed data.
///
/// # Examples
/// ```
/// use dispatch_core::{JobPool, JobRecord, ProblemInstance, RecordId, TimeMatrix};
/// use dispatch_core::{VehiclePool, VehicleRecord};
///
/// let matrix = TimeMatrix::build(&[vec![0, 10], vec![10, 0]])?;
/// let jobs = JobPool::build(
///     &[JobRecord { id: RecordId::new("j"), location_index: 1, delivery: vec![1], service: 5 }],
///     matrix.size(),
/// )?;
/// let vehicles = VehiclePool::build(
///     &[VehicleRecord { id: RecordId::new("v"), start_index: 0, capacity: vec![3] }],
///     matrix.size(),
/// )?;
/// let instance = ProblemInstance::build(&matrix, &vehicles, &jobs)?;
/// assert_eq!(instance.cost(0, 1), 15);
/// assert_eq!(instance.cost(1, 2), 0);
/// assert_eq!(instance.visit_nodes(), vec![1]);
/// # Ok::<(), dispatch_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProblemInstance<'a> {
    matrix: &'a TimeMatrix,
    vehicles: &'a VehiclePool,
    jobs: &'a JobPool,
}

impl<'a> ProblemInstance<'a> {
    /// Assemble an instance, checking that all parts agree on the node count.
    ///
    /// # Errors
    /// [`InvalidInputError::SizeMismatch`] when either pool was built for a
    /// different node count than `matrix`.
    pub fn build(
        matrix: &'a TimeMatrix,
        vehicles: &'a VehiclePool,
        jobs: &'a JobPool,
    ) -> Result<Self, InvalidInputError> {
        let expected = matrix.size();
        if jobs.node_count() != expected {
            return Err(InvalidInputError::SizeMismatch {
                part: "job pool",
                actual: jobs.node_count(),
                expected,
            });
        }
        if vehicles.node_count() != expected {
            return Err(InvalidInputError::SizeMismatch {
                part: "vehicle pool",
                actual: vehicles.node_count(),
                expected,
            });
        }
        Ok(Self {
            matrix,
            vehicles,
            jobs,
        })
    }

    /// Number of nodes including the terminal node.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.matrix.size()
    }

    /// The terminal node every vehicle ends at.
    #[must_use]
    pub const fn terminal(&self) -> NodeIndex {
        self.matrix.terminal()
    }

    /// Number of vehicles.
    #[must_use]
    pub const fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// The fleet the instance was built from.
    #[must_use]
    pub const fn vehicles(&self) -> &'a VehiclePool {
        self.vehicles
    }

    /// The job pool the instance was built from.
    #[must_use]
    pub const fn jobs(&self) -> &'a JobPool {
        self.jobs
    }

    /// Start node per vehicle.
    #[must_use]
    pub fn start_nodes(&self) -> Vec<NodeIndex> {
        self.vehicles.start_indices()
    }

    /// End node per vehicle.
    #[must_use]
    pub fn end_nodes(&self) -> Vec<NodeIndex> {
        self.vehicles.end_indices()
    }

    /// Capacity per vehicle.
    #[must_use]
    pub fn capacities(&self) -> Vec<u64> {
        self.vehicles.capacities()
    }

    /// Arc cost: travel time plus the service time at the destination.
    ///
    /// Out-of-range nodes cost nothing; callers only query nodes below
    /// [`ProblemInstance::node_count`].
    #[must_use]
    pub fn cost(&self, from: NodeIndex, to: NodeIndex) -> u64 {
        let travel = self.matrix.cost(from, to).unwrap_or(0);
        travel.saturating_add(self.jobs.service_time_at(to))
    }

    /// Pooled demand at `node`.
    #[must_use]
    pub fn demand(&self, node: NodeIndex) -> u64 {
        self.jobs.demand_at(node)
    }

    /// Pooled service time at `node`.
    #[must_use]
    pub fn service_time(&self, node: NodeIndex) -> u64 {
        self.jobs.service_time_at(node)
    }

    /// Nodes the engine must route: every real location that is not a start.
    ///
    /// A location without jobs is still visited, at zero demand.
    #[must_use]
    pub fn visit_nodes(&self) -> Vec<NodeIndex> {
        (0..self.terminal())
            .filter(|node| self.start_owner(*node).is_none())
            .collect()
    }

    /// Whether `node` is a real location no vehicle starts at.
    #[must_use]
    pub fn is_visit_node(&self, node: NodeIndex) -> bool {
        node < self.terminal() && self.start_owner(node).is_none()
    }

    /// The vehicle delivering the jobs located at start node `node`.
    #[must_use]
    pub fn start_owner(&self, node: NodeIndex) -> Option<usize> {
        self.vehicles
            .vehicles()
            .iter()
            .position(|vehicle| vehicle.start == node)
    }

    /// Demand a vehicle carries from the moment it leaves its start.
    #[must_use]
    pub fn start_load(&self, vehicle: usize) -> u64 {
        if self.vehicles.owns_start(vehicle) {
            self.vehicles
                .get(vehicle)
                .map_or(0, |owner| self.demand(owner.start))
        } else {
            0
        }
    }

    /// Search budget: one second per started block of 500 nodes.
    #[must_use]
    pub fn time_budget(&self) -> Duration {
        let blocks = self
            .node_count()
            .checked_div(NODES_PER_BUDGET_SECOND)
            .unwrap_or(0);
        let seconds = u64::try_from(blocks).unwrap_or(u64::MAX);
        Duration::from_secs(seconds.saturating_add(1))
    }
}
