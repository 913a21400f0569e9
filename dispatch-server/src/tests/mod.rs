//! Shared test harness modules for the `dispatch` CLI and HTTP surface.

use super::*;

mod helpers;
mod solve_unit;
mod unit;
