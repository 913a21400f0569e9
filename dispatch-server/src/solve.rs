//! `solve` subcommand: run one request file through the pipeline.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use dispatch_core::{SolutionReport, solve_json};
use dispatch_solver_vrp::VrpEngineConfig;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::engine::{EngineFactory, VrpEngineFactory, engine_config};
use crate::{ARG_MAX_GENERATIONS, ARG_SOLVE_REQUEST, ARG_TIME_LIMIT, CliError, ENV_SOLVE_REQUEST};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a routing request stored as JSON and print the \
                 solution report. The request uses the same format as the \
                 HTTP endpoint.",
    about = "Solve a routing request from a JSON file"
)]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing the request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Upper bound on search generations.
    #[arg(long = ARG_MAX_GENERATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_generations: Option<usize>,
    /// Search time in seconds, replacing the size-derived budget.
    #[arg(long = ARG_TIME_LIMIT, value_name = "secs")]
    #[serde(default)]
    pub(crate) time_limit: Option<u64>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Engine settings for this solve.
    pub(crate) engine: VrpEngineConfig,
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;
        Ok(Self {
            request_path,
            engine: engine_config(args.max_generations, args.time_limit),
        })
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &VrpEngineFactory, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    factory: &dyn EngineFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_solve(&config, factory)?;
    write_solve_report(writer, &report)
}

fn execute_solve(
    config: &SolveConfig,
    factory: &dyn EngineFactory,
) -> Result<SolutionReport, CliError> {
    let payload = load_solve_request(&config.request_path)?;
    let engine = factory.build(&config.engine);
    solve_json(&payload, engine.as_ref()).map_err(|source| CliError::Solve {
        path: config.request_path.clone(),
        source,
    })
}

/// Reads the raw request payload from disk.
pub(super) fn load_solve_request(path: &Utf8Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::ReadSolveRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solve_report(writer: &mut dyn Write, report: &SolutionReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerializeSolveReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSolveOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteSolveOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
