//! Entry point for the `dispatch` binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use dispatch_server::CliError;

fn main() -> ExitCode {
    match dispatch_server::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before exiting"
)]
fn report(err: &CliError) {
    eprintln!("dispatch: {err}");
}
