//! CLI argument parsing for tailpanel.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::logging::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tailpanel: a terminal front-end for the tailscale command-line tool.
///
/// Pick a tailscale subcommand, type its parameters, and read the captured
/// output in a scrollable pane. Without a subcommand the interactive window
/// opens.
#[derive(Parser, Debug)]
#[command(name = "tailpanel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Options shared by every command.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Executable of the wrapped tool (default: tailscale).
    #[arg(long, global = true, value_name = "NAME")]
    pub tool: Option<String>,

    /// Hard timeout for each command, in seconds (default: 60).
    #[arg(long = "timeout", global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// YAML configuration file. Nothing is read unless this is given.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Diagnostic log verbosity.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

/// Available commands for tailpanel.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive window (the default).
    ///
    /// Checks that the tool is installed, then shows the command selector,
    /// parameter field, preset row, output log, and status line.
    Ui,

    /// Run one command without the interactive window.
    ///
    /// Prints the same report the output log would show and exits with the
    /// tool's exit code.
    Run(RunArgs),

    /// Check whether the tool is installed.
    ///
    /// Runs `<tool> version` with the probe timeout.
    Check,

    /// List the known subcommands with their default parameters.
    Commands,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Subcommand to pass to the tool (e.g., status). Not restricted to
    /// known commands.
    pub command: String,

    /// Parameters passed after the subcommand.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub params: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["tailpanel"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.global.log_level, LogLevel::Info);
    }

    #[test]
    fn run_collects_hyphenated_params() {
        let cli = Cli::try_parse_from(["tailpanel", "run", "up", "--accept-routes", "--ssh"]).unwrap();
        match cli.command {
            Some(Command::Run(args)) => {
                assert_eq!(args.command, "up");
                assert_eq!(args.params, vec!["--accept-routes", "--ssh"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_options_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "tailpanel",
            "--tool",
            "/opt/tailscale",
            "--timeout",
            "5",
            "--log-level",
            "debug",
            "check",
        ])
        .unwrap();
        assert_eq!(cli.global.tool.as_deref(), Some("/opt/tailscale"));
        assert_eq!(cli.global.timeout_secs, Some(5));
        assert_eq!(cli.global.log_level, LogLevel::Debug);
        assert!(matches!(cli.command, Some(Command::Check)));
    }

    #[test]
    fn run_requires_a_command() {
        assert!(Cli::try_parse_from(["tailpanel", "run"]).is_err());
    }
}
