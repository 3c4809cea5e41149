//! Command implementations for tailpanel.
//!
//! This module provides the dispatcher that loads configuration, installs
//! logging, and routes the parsed CLI to its handler. Each handler returns
//! the process exit code on success.

mod check;
mod list;
mod run;

use crate::cli::{Cli, Command, GlobalArgs};
use crate::config::Config;
use crate::error::Result;
use crate::exit_codes;
use crate::logging;
use crate::ui;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let command = cli.command.unwrap_or(Command::Ui);
    let interactive = matches!(command, Command::Ui);

    logging::init(
        logging::sink_for(cli.global.log_file.as_deref(), interactive),
        cli.global.log_level,
    )?;

    let config = load_config(&cli.global)?;
    tracing::debug!(tool = %config.tool, timeout_secs = config.timeout_secs, "config.loaded");

    match command {
        Command::Ui => ui::run(&config).map(|()| exit_codes::SUCCESS),
        Command::Run(args) => run::cmd_run(&config, args),
        Command::Check => check::cmd_check(&config),
        Command::Commands => list::cmd_commands(&config),
    }
}

/// Defaults, then the `--config` file if given, then command-line flags.
fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.with_overrides(global.tool.clone(), global.timeout_secs)
}
