//! HTTP service and command-line interface for the Dispatch routing engine.
//!
//! The `dispatch` binary offers two subcommands:
//!
//! - `serve` exposes `POST /`, which accepts a routing request as JSON and
//!   answers with the solution report, or a `{"message": ...}` body with
//!   status 422 (invalid input, no feasible solution) or 500 (internal
//!   failure).
//! - `solve` runs a single request file through the same pipeline and prints
//!   the report to standard output.
//!
//! Both subcommands layer their options from CLI flags, `DISPATCH_CMDS_*`
//! environment variables and configuration files via `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod engine;
mod error;
mod http;
mod logging;
mod serve;
mod solve;

pub use error::CliError;
pub use http::{ApiError, DEFAULT_BODY_LIMIT, ErrorBody, SharedEngine, router, router_with_body_limit};
pub use logging::init_logging;

use crate::serve::ServeArgs;
use crate::solve::SolveArgs;

const ARG_HOST: &str = "host";
const ARG_PORT: &str = "port";
const ARG_MAX_GENERATIONS: &str = "max-generations";
const ARG_TIME_LIMIT: &str = "time-limit";
const ARG_MAX_BODY_BYTES: &str = "max-body-bytes";
const ARG_SOLVE_REQUEST: &str = "request-path";
const ENV_SOLVE_REQUEST: &str = "DISPATCH_CMDS_SOLVE_REQUEST_PATH";

/// Run the `dispatch` CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering,
/// logging set-up or the selected subcommand fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging()?;
    match cli.command {
        Command::Serve(args) => serve::run_serve(args),
        Command::Solve(args) => solve::run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dispatch",
    about = "Capacitated vehicle routing over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve routing requests on `POST /`.
    Serve(ServeArgs),
    /// Solve a single JSON request file and print the report.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
