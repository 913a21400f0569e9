//! Focused unit tests covering argument parsing and engine settings.

use super::*;
use crate::engine::engine_config;
use camino::Utf8Path;
use dispatch_solver_vrp::VrpEngineConfig;
use rstest::rstest;

#[rstest]
fn serve_parses_listen_options() {
    let cli = Cli::try_parse_from([
        "dispatch",
        "serve",
        "--host",
        "127.0.0.1",
        "--port",
        "8080",
        "--max-body-bytes",
        "1048576",
    ])
    .expect("serve should parse");
    match cli.command {
        Command::Serve(args) => {
            assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
            assert_eq!(args.port, Some(8080));
            assert_eq!(args.max_body_bytes, Some(1_048_576));
            assert_eq!(args.max_generations, None);
        }
        Command::Solve(_) => panic!("expected serve command"),
    }
}

#[rstest]
fn solve_parses_positional_path_and_search_options() {
    let cli = Cli::try_parse_from([
        "dispatch",
        "solve",
        "request.json",
        "--max-generations",
        "50",
        "--time-limit",
        "2",
    ])
    .expect("solve should parse");
    match cli.command {
        Command::Solve(args) => {
            assert_eq!(args.request_path.as_deref().map(Utf8Path::as_str), Some("request.json"));
            assert_eq!(args.max_generations, Some(50));
            assert_eq!(args.time_limit, Some(2));
        }
        Command::Serve(_) => panic!("expected solve command"),
    }
}

#[rstest]
#[case::no_subcommand(&["dispatch"])]
#[case::unknown_subcommand(&["dispatch", "route"])]
#[case::bad_port(&["dispatch", "serve", "--port", "eighty"])]
fn invalid_command_lines_are_rejected(#[case] argv: &[&str]) {
    let err = Cli::try_parse_from(argv).expect_err("command line should be rejected");
    assert!(matches!(CliError::from(err), CliError::ArgumentParsing(_)));
}

#[rstest]
#[case(None, None, VrpEngineConfig::default())]
#[case(Some(10), None, VrpEngineConfig { max_generations: Some(10), max_time_override: None })]
#[case(None, Some(4), VrpEngineConfig { max_generations: Some(3_000), max_time_override: Some(4) })]
fn engine_config_layers_over_defaults(
    #[case] max_generations: Option<usize>,
    #[case] time_limit: Option<u64>,
    #[case] expected: VrpEngineConfig,
) {
    assert_eq!(engine_config(max_generations, time_limit), expected);
}
