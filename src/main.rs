//! execgate: policy-driven command execution gate for agentic coding pipelines.
//!
//! This is the main entry point for the `execgate` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use execgate::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
