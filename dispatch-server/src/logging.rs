//! Log subscriber set-up for the `dispatch` binary.
//!
//! Library crates log through the `log` facade; the subscriber installed
//! here forwards those records alongside the binary's own `tracing` events.

use tracing_subscriber::EnvFilter;

use crate::CliError;

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info";

/// Install the global `tracing` subscriber.
///
/// Output goes to stderr so that `dispatch solve` keeps stdout for the
/// report.
///
/// # Errors
/// Returns [`CliError::Logging`] when a global subscriber is already set.
pub fn init_logging() -> Result<(), CliError> {
    let filter = env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn env_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
