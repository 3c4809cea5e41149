//! Implementation of the `tailpanel check` command.

use crate::config::Config;
use crate::error::{PanelError, Result};
use crate::exit_codes;
use crate::probe::{self, ProbeOutcome};

pub fn cmd_check(config: &Config) -> Result<i32> {
    match probe::probe(&config.tool, config.probe_timeout()) {
        ProbeOutcome::Available { version } => {
            match version {
                Some(v) => println!("{} is available (version {})", config.tool, v),
                None => println!("{} is available", config.tool),
            }
            Ok(exit_codes::SUCCESS)
        }
        ProbeOutcome::NotInstalled => {
            println!("{}", probe::install_instructions(&config.tool));
            Err(PanelError::ToolNotFound {
                tool: config.tool.clone(),
            })
        }
        ProbeOutcome::Inconclusive { detail } => Err(PanelError::InvocationFailed(format!(
            "could not confirm that {} works: {}",
            config.tool, detail
        ))),
    }
}
