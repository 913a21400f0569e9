//! `vrp-core` modelling helpers for `VrpEngine`.
//!
//! This module converts a [`ProblemInstance`] into a `vrp-core` problem, runs
//! the solver inside a scoped session, and translates the resulting tours
//! back into an [`Assignment`].

use std::sync::Arc;

use dispatch_core::{Assignment, InvalidInputError, NodeIndex, ProblemInstance, SolveError};
use vrp_core::models::common::{Dimensions, Location, Profile};
use vrp_core::models::problem::{TravelTime, VehicleIdDimension};
use vrp_core::models::solution::Route as VrpRoute;
use vrp_core::prelude::*;

use crate::engine::VrpEngineConfig;

const VEHICLE_ID_PREFIX: &str = "vehicle-";

fn define_goal(transport: Arc<dyn TransportCost>) -> GenericResult<GoalContext> {
    let minimize_unassigned = MinimizeUnassignedBuilder::new("min-unassigned").build()?;
    let capacity_feature = CapacityFeatureBuilder::<SingleDimLoad>::new("capacity").build()?;
    let transport_feature = TransportFeatureBuilder::new("min-delivery-time")
        .set_transport_cost(transport)
        .set_time_constrained(false)
        .build_minimize_distance()?;

    GoalContextBuilder::with_features(&[minimize_unassigned, transport_feature, capacity_feature])?
        .build()
}

fn load(value: u64, what: &str) -> GenericResult<SingleDimLoad> {
    i32::try_from(value)
        .map(SingleDimLoad::new)
        .map_err(|_| format!("{what} {value} exceeds the supported load range").into())
}

fn delivery(demand: SingleDimLoad) -> Demand<SingleDimLoad> {
    Demand {
        pickup: (SingleDimLoad::default(), SingleDimLoad::default()),
        delivery: (demand, SingleDimLoad::default()),
    }
}

fn define_problem(
    instance: &ProblemInstance<'_>,
    goal: GoalContext,
    transport: Arc<dyn TransportCost>,
) -> GenericResult<Problem> {
    let jobs = instance
        .visit_nodes()
        .into_iter()
        .map(|node| {
            let demand = load(instance.demand(node), "demand")?;
            SingleBuilder::default()
                .id(format!("node{node}").as_str())
                .demand(delivery(demand))
                .location(node)?
                .build_as_job()
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Jobs at a start node ride along from the start, so they shrink the
    // owning vehicle's free capacity instead of becoming engine jobs.
    let vehicles = instance
        .vehicles()
        .vehicles()
        .iter()
        .enumerate()
        .map(|(index, vehicle)| {
            let free = vehicle
                .capacity
                .checked_sub(instance.start_load(index))
                .ok_or_else(|| format!("vehicle {} is overloaded at its start", vehicle.id))?;
            VehicleBuilder::default()
                .id(format!("{VEHICLE_ID_PREFIX}{index}").as_str())
                .add_detail(
                    VehicleDetailBuilder::default()
                        .set_start_location(vehicle.start)
                        .set_end_location(vehicle.end)
                        .build()?,
                )
                .capacity(load(free, "capacity")?)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(vehicles.into_iter())
        .with_goal(goal)
        .with_transport_cost(transport)
        .build()
}

/// Matrix-backed transport cost whose distance is the instance's arc cost.
struct ArcCostTransport {
    costs: Vec<Vec<f64>>,
}

impl ArcCostTransport {
    fn new(instance: &ProblemInstance<'_>) -> Self {
        let nodes = instance.node_count();
        let costs = (0..nodes)
            .map(|from| {
                (0..nodes)
                    .map(|to| as_cost(instance.cost(from, to)))
                    .collect()
            })
            .collect();
        Self { costs }
    }

    fn arc_cost(&self, from: Location, to: Location) -> f64 {
        let result = self.costs.get(from).and_then(|row| row.get(to)).copied();
        debug_assert!(result.is_some(), "Matrix lookup failed: from={from}, to={to}");
        result.unwrap_or(0.0)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "vrp-core costs are f64; delivery times stay far below 2^53"
)]
const fn as_cost(value: u64) -> f64 {
    value as f64
}

impl TransportCost for ArcCostTransport {
    // The trait passes the route and departure time for time-dependent
    // costs; arc costs here depend on the node pair only.
    fn distance(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> Cost {
        self.arc_cost(from, to)
    }

    fn duration(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> f64 {
        self.arc_cost(from, to)
    }

    fn distance_approx(&self, profile: &Profile, from: usize, to: usize) -> f64 {
        self.duration_approx(profile, from, to)
    }

    fn duration_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        self.arc_cost(from, to)
    }
}

/// Scoped `vrp-core` session.
///
/// Holds the engine problem for the duration of one solve and logs its
/// release on every exit path.
struct EngineSession {
    problem: Arc<Problem>,
    nodes: usize,
}

impl EngineSession {
    fn open(instance: &ProblemInstance<'_>) -> Result<Self, SolveError> {
        let transport = Arc::new(ArcCostTransport::new(instance));
        let goal = define_goal(transport.clone()).map_err(rejected)?;
        let problem = Arc::new(define_problem(instance, goal, transport).map_err(rejected)?);
        log::debug!(
            "opened vrp-core session for {} nodes",
            instance.node_count()
        );
        Ok(Self {
            problem,
            nodes: instance.node_count(),
        })
    }

    fn run(&self, config: &VrpEngineConfig, budget_secs: usize) -> Result<Solution, SolveError> {
        let vrp_config = VrpConfigBuilder::new(self.problem.clone())
            .prebuild()
            .map_err(rejected)?
            .with_max_generations(config.max_generations)
            .with_max_time(Some(budget_secs))
            .build()
            .map_err(rejected)?;

        vrp_core::solver::Solver::new(self.problem.clone(), vrp_config)
            .solve()
            .map_err(|err| SolveError::Internal(format!("vrp-core solver failed: {err}")))
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        log::debug!("released vrp-core session for {} nodes", self.nodes);
    }
}

fn rejected(err: impl std::fmt::Display) -> SolveError {
    SolveError::InvalidInput(InvalidInputError::EngineRejected(err.to_string()))
}

/// Context for running a `vrp-core` solve with shared configuration.
pub(super) struct VrpSolveContext<'a> {
    config: &'a VrpEngineConfig,
}

impl<'a> VrpSolveContext<'a> {
    /// Create a new solve context.
    pub(super) const fn new(config: &'a VrpEngineConfig) -> Self {
        Self { config }
    }

    /// Solve `instance`, returning `None` when any visit node stays unassigned.
    pub(super) fn solve(
        &self,
        instance: &ProblemInstance<'_>,
    ) -> Result<Option<Assignment>, SolveError> {
        let budget_secs = self
            .config
            .max_time_override
            .unwrap_or_else(|| instance.time_budget().as_secs());
        let budget = usize::try_from(budget_secs).unwrap_or(usize::MAX);

        let session = EngineSession::open(instance)?;
        let solution = session.run(self.config, budget)?;

        if !solution.unassigned.is_empty() {
            log::debug!(
                "vrp-core left {} of {} visit nodes unassigned",
                solution.unassigned.len(),
                instance.visit_nodes().len()
            );
            return Ok(None);
        }

        let routes = collect_routes(instance, &solution)?;
        Assignment::from_routes(instance, &routes).map(Some)
    }
}

/// Visit sequences per vehicle, in fleet order.
fn collect_routes(
    instance: &ProblemInstance<'_>,
    solution: &Solution,
) -> Result<Vec<Vec<NodeIndex>>, SolveError> {
    let mut routes = vec![Vec::new(); instance.vehicle_count()];
    for route in &solution.routes {
        let index = vehicle_index(&route.actor.vehicle.dimens)?;
        let slot = routes.get_mut(index).ok_or_else(|| {
            SolveError::Internal(format!("vrp-core returned unknown vehicle {index}"))
        })?;
        slot.extend(
            route
                .tour
                .all_activities()
                .filter(|activity| activity.job.is_some())
                .map(|activity| activity.place.location),
        );
    }
    Ok(routes)
}

fn vehicle_index(dimens: &Dimensions) -> Result<usize, SolveError> {
    dimens
        .get_vehicle_id()
        .and_then(|id| id.strip_prefix(VEHICLE_ID_PREFIX))
        .and_then(|index| index.parse().ok())
        .ok_or_else(|| SolveError::internal("vrp-core route has no recognisable vehicle id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::test_support::{job, vehicle};
    use dispatch_core::{JobPool, TimeMatrix, VehiclePool};
    use rstest::rstest;

    #[rstest]
    #[expect(clippy::float_cmp, reason = "integral costs convert to f64 exactly")]
    fn transport_uses_arc_cost() {
        let matrix = TimeMatrix::build(&[vec![0, 3], vec![4, 0]]).expect("matrix");
        let jobs = JobPool::build(&[job("a", 1, 1, 6)], matrix.size()).expect("jobs");
        let fleet = VehiclePool::build(&[vehicle("v", 0, 1)], matrix.size()).expect("fleet");
        let instance = ProblemInstance::build(&matrix, &fleet, &jobs).expect("instance");

        let transport = ArcCostTransport::new(&instance);
        assert_eq!(transport.arc_cost(0, 1), 9.0);
        assert_eq!(transport.arc_cost(1, 2), 0.0);
        assert_eq!(transport.arc_cost(1, 0), 4.0);
    }

    #[rstest]
    #[case(0, true)]
    #[case(2_147_483_647, true)]
    #[case(2_147_483_648, false)]
    fn load_accepts_i32_range(#[case] value: u64, #[case] accepted: bool) {
        assert_eq!(load(value, "demand").is_ok(), accepted);
    }

    #[rstest]
    fn vehicle_index_round_trips_prefix() {
        let mut dimens = Dimensions::default();
        dimens.set_vehicle_id(format!("{VEHICLE_ID_PREFIX}3"));
        assert_eq!(vehicle_index(&dimens), Ok(3));

        let mut foreign = Dimensions::default();
        foreign.set_vehicle_id("walker".to_owned());
        assert!(vehicle_index(&foreign).is_err());
    }
}
