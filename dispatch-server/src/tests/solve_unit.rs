//! Focused unit tests covering the solve command.

use super::helpers::{StubEngineFactory, single_job_request, temp_root, write_utf8};
use super::*;
use crate::solve::{SolveConfig, config_from_layers_for_test, load_solve_request, run_solve_with};
use dispatch_core::{InvalidInputError, RecordId, SolutionReport, SolveError};
use dispatch_solver_vrp::VrpEngineConfig;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn converting_solve_without_request_errors() {
    let err = SolveConfig::try_from(SolveArgs::default()).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SOLVE_REQUEST);
            assert_eq!(env, ENV_SOLVE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn solve_prints_the_report_as_json() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("request.json");
    let payload = serde_json::to_vec(&single_job_request()).expect("serialize request");
    write_utf8(&request_path, &payload);

    let factory = StubEngineFactory::routing(vec![vec![1]]);
    let args = SolveArgs {
        request_path: Some(request_path),
        time_limit: Some(1),
        ..SolveArgs::default()
    };
    let mut stdout = Vec::new();
    run_solve_with(args, &factory, &mut stdout).expect("solve should succeed");

    let report: SolutionReport = serde_json::from_slice(&stdout).expect("stdout holds a report");
    assert_eq!(report.total_delivery_duration, 10);
    let route = report
        .routes
        .get(&RecordId::new("van"))
        .expect("route for van");
    assert_eq!(route.jobs, vec![RecordId::new("parcel")]);
    assert_eq!(
        factory.seen(),
        Some(VrpEngineConfig {
            max_generations: Some(3_000),
            max_time_override: Some(1),
        })
    );
}

#[rstest]
fn malformed_request_is_reported_as_invalid_input() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("request.json");
    write_utf8(&request_path, b"{ not valid json");

    let args = SolveArgs {
        request_path: Some(request_path.clone()),
        ..SolveArgs::default()
    };
    let mut stdout = Vec::new();
    let err = run_solve_with(args, &StubEngineFactory::default(), &mut stdout)
        .expect_err("malformed request should error");
    match err {
        CliError::Solve { path, source } => {
            assert_eq!(path, request_path);
            assert!(matches!(
                source,
                SolveError::InvalidInput(InvalidInputError::Malformed(_))
            ));
        }
        other => panic!("expected Solve, found {other:?}"),
    }
    assert!(stdout.is_empty());
}

#[rstest]
fn missing_request_file_returns_read_error() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("absent.json");

    let err = load_solve_request(&request_path).expect_err("missing request should error");
    match err {
        CliError::ReadSolveRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected ReadSolveRequest, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_take_request_path_from_environment() {
    let (_tmp, root) = temp_root();
    let env_request = root.join("from-env.json");

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "max_generations": 40 }), None);
    composer.push_environment(json!({ "request_path": env_request.as_str() }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    assert_eq!(config.engine.max_generations, Some(40));
}
