//! Configuration types and defaults for tailpanel.

use crate::catalog::ToolCommand;
use crate::dispatch::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};

/// A quick-preset bound to a function key.
///
/// Applying a preset fills the selector and parameter field; it does not run
/// the command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Button label shown in the preset row.
    pub label: String,

    /// Command selected when the preset is applied.
    pub command: ToolCommand,

    /// Parameter string placed in the parameter field.
    #[serde(default)]
    pub params: String,
}

impl Preset {
    pub fn new(label: &str, command: ToolCommand, params: &str) -> Self {
        Self {
            label: label.to_string(),
            command,
            params: params.to_string(),
        }
    }
}

/// Maximum number of presets; one per function key F2..F9.
pub const MAX_PRESETS: usize = 8;

/// Default preset row.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new("Status", ToolCommand::Status, ""),
        Preset::new("Connect", ToolCommand::Up, "--accept-routes"),
        Preset::new("Disconnect", ToolCommand::Down, ""),
        Preset::new("Netcheck", ToolCommand::Netcheck, ""),
        Preset::new("Show IP", ToolCommand::Ip, ""),
    ]
}

// Default value functions for serde
pub(crate) fn default_tool() -> String {
    "tailscale".to_string()
}
pub(crate) fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}
pub(crate) fn default_probe_timeout_secs() -> u64 {
    5
}
