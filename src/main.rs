//! wpack: zero-configuration bundling.
//!
//! This is the main entry point for the `wpack` CLI. It parses arguments,
//! runs the configuration pipeline, and handles errors with proper exit
//! codes.

use std::process::ExitCode;
use wpack::cli::Cli;
use wpack::{commands, exit_codes, logging};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(err) = logging::init(&cli.log_level) {
        eprintln!("Error: {}", err);
        return ExitCode::from(err.exit_code() as u8);
    }

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
