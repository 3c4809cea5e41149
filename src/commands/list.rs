//! Implementation of the `tailpanel commands` command.

use crate::catalog::ToolCommand;
use crate::config::Config;
use crate::error::Result;
use crate::exit_codes;

pub fn cmd_commands(config: &Config) -> Result<i32> {
    print!("{}", command_table(config));
    Ok(exit_codes::SUCCESS)
}

fn command_table(config: &Config) -> String {
    let mut out = format!("Known {} commands:\n\n", config.tool);
    for cmd in ToolCommand::all() {
        out.push_str(&format!("  {:<10} {}", cmd.as_str(), cmd.summary()));
        if let Some(defaults) = cmd.default_params() {
            out.push_str(&format!("  (default: {})", defaults));
        }
        out.push('\n');
    }

    if !config.presets.is_empty() {
        out.push_str("\nPresets:\n\n");
        for (i, preset) in config.presets.iter().enumerate() {
            out.push_str(&format!(
                "  F{:<2} {:<12} {} {}\n",
                i + 2,
                preset.label,
                preset.command,
                preset.params
            ));
        }
    }
    out
}
