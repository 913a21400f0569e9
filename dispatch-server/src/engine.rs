//! Engine construction shared by the subcommands.

use std::sync::Arc;

use dispatch_solver_vrp::{VrpEngine, VrpEngineConfig};

use crate::http::SharedEngine;

/// Builds the routing engine for one command invocation.
pub(crate) trait EngineFactory {
    fn build(&self, config: &VrpEngineConfig) -> SharedEngine;
}

/// Factory for the production `vrp-core` engine.
pub(crate) struct VrpEngineFactory;

impl EngineFactory for VrpEngineFactory {
    fn build(&self, config: &VrpEngineConfig) -> SharedEngine {
        Arc::new(VrpEngine::with_config(config.clone()))
    }
}

/// Engine configuration from the layered search options.
///
/// Unset options keep the engine defaults; a time limit replaces the
/// size-derived budget.
pub(crate) fn engine_config(
    max_generations: Option<usize>,
    time_limit: Option<u64>,
) -> VrpEngineConfig {
    let defaults = VrpEngineConfig::default();
    VrpEngineConfig {
        max_generations: max_generations.or(defaults.max_generations),
        max_time_override: time_limit.or(defaults.max_time_override),
    }
}
