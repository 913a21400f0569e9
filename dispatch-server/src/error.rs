//! Error types emitted by the `dispatch` CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dispatch_core::SolveError;
use thiserror::Error;

/// Errors emitted by the `dispatch` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it on the command line or set {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The configured listen host is blank.
    #[error("listen host must not be empty")]
    EmptyHost,
    /// The configured request body limit is zero.
    #[error("maximum request body size must be positive")]
    EmptyBodyLimit,
    /// Installing the global log subscriber failed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
    /// Building the async runtime failed.
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Binding the listen socket failed.
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// Address that could not be bound.
        address: String,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server stopped with an error.
    #[error("HTTP server failed: {0}")]
    Serve(#[source] std::io::Error),
    /// Reading the solve request file failed.
    #[error("failed to read solve request at {path:?}: {source}")]
    ReadSolveRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },
    /// The request could not be solved.
    #[error("failed to solve request at {path:?}: {source}")]
    Solve {
        /// Request file path.
        path: Utf8PathBuf,
        /// Pipeline failure.
        #[source]
        source: SolveError,
    },
    /// Serializing the solution report failed.
    #[error("failed to serialize solution report: {0}")]
    SerializeSolveReport(#[source] serde_json::Error),
    /// Writing the solve output failed.
    #[error("failed to write solve output: {0}")]
    WriteSolveOutput(#[source] std::io::Error),
}
