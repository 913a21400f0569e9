//! Test-only utilities for `dispatch-solver-vrp`.
//!
//! The helpers in this module are available to unit tests, behavioural tests
//! and benchmarks. They are gated behind the `test-support` feature (and
//! `cfg(test)`).

use crate::{VrpEngine, VrpEngineConfig};

/// Build a travel-time matrix for locations on a line.
///
/// The travel time between two locations is the distance between their
/// positions, which keeps optimal routes easy to work out by hand.
///
/// # Examples
/// ```rust
/// use dispatch_solver_vrp::test_support::line_matrix;
///
/// let matrix = line_matrix(&[0, 10, 25]);
/// assert_eq!(matrix, vec![vec![0, 10, 25], vec![10, 0, 15], vec![25, 15, 0]]);
/// ```
#[must_use]
pub fn line_matrix(positions: &[u64]) -> Vec<Vec<u64>> {
    positions
        .iter()
        .map(|from| positions.iter().map(|to| from.abs_diff(*to)).collect())
        .collect()
}

/// Engine with a short search, for tests that need a real solve.
#[must_use]
pub const fn quick_engine() -> VrpEngine {
    VrpEngine::with_config(VrpEngineConfig {
        max_generations: Some(200),
        max_time_override: Some(5),
    })
}
