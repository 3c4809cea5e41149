//! Known tailscale subcommands.
//!
//! The selector, presets, and help overlay work from this closed set. The
//! dispatcher itself accepts any command string, so nothing here restricts
//! what `tailpanel run` can forward.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A subcommand of the wrapped tool that the interactive surface knows about.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToolCommand {
    #[default]
    Status,
    Up,
    Down,
    Login,
    Logout,
    Netcheck,
    Ping,
    Version,
    Ip,
    Web,
    Ssh,
    Funnel,
}

impl ToolCommand {
    /// The subcommand as passed on the command line.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Parameter string the selector pre-fills when this command is chosen.
    pub fn default_params(self) -> Option<&'static str> {
        match self {
            Self::Ping => Some("100.64.0.1"),
            Self::Ssh => Some("username@hostname"),
            Self::Funnel => Some("on 8080"),
            Self::Status
            | Self::Up
            | Self::Down
            | Self::Login
            | Self::Logout
            | Self::Netcheck
            | Self::Version
            | Self::Ip
            | Self::Web => None,
        }
    }

    /// One-line description for the help overlay and `tailpanel commands`.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Status => "Show the current connection status",
            Self::Up => "Connect this device to the tailnet",
            Self::Down => "Disconnect from the tailnet",
            Self::Login => "Log in to a tailscale account",
            Self::Logout => "Log out of the current account",
            Self::Netcheck => "Diagnose local network conditions",
            Self::Ping => "Test connectivity to another node",
            Self::Version => "Print the tailscale version",
            Self::Ip => "Show this device's tailscale IP addresses",
            Self::Web => "Run the web management interface",
            Self::Ssh => "SSH to another node",
            Self::Funnel => "Manage Funnel services",
        }
    }

    /// All known commands in selector order.
    pub fn all() -> Vec<ToolCommand> {
        Self::iter().collect()
    }

    /// The command after `self` in selector order, wrapping around.
    pub fn next(self) -> ToolCommand {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// The command before `self` in selector order, wrapping around.
    pub fn prev(self) -> ToolCommand {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Static reference text shown by the help overlay.
pub fn help_text(tool: &str) -> String {
    let mut out = format!("{} command help:\n\n", tool);
    for cmd in ToolCommand::iter() {
        out.push_str(&format!("{:<10} - {}\n", cmd.as_str(), cmd.summary()));
    }
    out.push_str("\nMore information: https://tailscale.com/kb/\n");
    out
}
