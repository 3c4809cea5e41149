//! Tailpanel: a terminal front-end for the tailscale command-line tool.
//!
//! This is the main entry point for the `tailpanel` binary. It parses
//! arguments, dispatches to the interactive window or a headless command,
//! and maps errors to exit codes.

mod catalog;
mod cli;
mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exit_codes;
mod logging;
mod probe;
mod report;
mod ui;
mod worker;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        // Tool exit codes outside 0..=255 (e.g. -1 for a signal) become 1.
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(exit_codes::USER_ERROR as u8)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
