//! `VrpEngine` implementation backed by `vrp-core`.

use dispatch_core::{Assignment, ProblemInstance, RoutingEngine, SolveError};

use crate::vrp::VrpSolveContext;

/// Configuration for [`VrpEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VrpEngineConfig {
    /// Upper bound on `vrp-core` generations; `None` searches until the time
    /// budget runs out.
    pub max_generations: Option<usize>,
    /// Search time in seconds, replacing [`ProblemInstance::time_budget`].
    pub max_time_override: Option<u64>,
}

impl Default for VrpEngineConfig {
    fn default() -> Self {
        Self {
            max_generations: Some(3_000),
            max_time_override: None,
        }
    }
}

/// Native routing engine using `vrp-core` to search for minimum-time routes.
///
/// Initial routes come from `vrp-core`'s insertion heuristics and are refined
/// by its ruin-and-recreate search until the generation limit or the time
/// budget is reached. The engine holds no per-request state and may be shared
/// across threads.
///
/// # Examples
/// ```no_run
/// use dispatch_core::solve_json;
/// use dispatch_solver_vrp::VrpEngine;
///
/// let payload = br#"{
///     "matrix": [[0, 4], [4, 0]],
///     "vehicles": [{"id": 1, "start_index": 0, "capacity": [2]}],
///     "jobs": [{"id": 7, "location_index": 1, "delivery": [1], "service": 1}]
/// }"#;
/// let report = solve_json(payload, &VrpEngine::default())?;
/// assert_eq!(report.total_delivery_duration, 5);
/// # Ok::<(), dispatch_core::SolveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct VrpEngine {
    config: VrpEngineConfig,
}

impl VrpEngine {
    /// Construct an engine using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an engine with explicit configuration.
    #[must_use]
    pub const fn with_config(config: VrpEngineConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &VrpEngineConfig {
        &self.config
    }
}

impl RoutingEngine for VrpEngine {
    fn solve(&self, instance: &ProblemInstance<'_>) -> Result<Option<Assignment>, SolveError> {
        if instance.visit_nodes().is_empty() {
            log::debug!("no visit nodes; every vehicle goes straight to the terminal");
            let routes = vec![Vec::new(); instance.vehicle_count()];
            return Assignment::from_routes(instance, &routes).map(Some);
        }
        VrpSolveContext::new(&self.config).solve(instance)
    }
}
