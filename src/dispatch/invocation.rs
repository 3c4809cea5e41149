//! Invocation construction.

use std::time::Duration;

/// Default hard timeout for a dispatched command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// One request to run the tool with a command and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name or path of the wrapped tool.
    pub tool: String,
    /// Subcommand passed as the first argument. Not validated.
    pub command: String,
    /// Whitespace-split parameter tokens, in order.
    pub args: Vec<String>,
    /// Hard limit on how long the child may run.
    pub timeout: Duration,
}

impl Invocation {
    /// Build an invocation from a command name and a raw parameter string.
    ///
    /// The parameter string is split on whitespace; an empty or blank string
    /// contributes no arguments.
    pub fn new(
        tool: impl Into<String>,
        command: impl AsRef<str>,
        params: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            tool: tool.into(),
            command: command.as_ref().trim().to_string(),
            args: split_params(params),
            timeout,
        }
    }

    /// Full argument vector: `[tool, command, args...]`.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        argv.push(self.tool.clone());
        argv.push(self.command.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// The argument vector joined by single spaces, as echoed in the log.
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

/// Split a raw parameter string into argument tokens.
pub fn split_params(params: &str) -> Vec<String> {
    params.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_add_no_arguments() {
        let inv = Invocation::new("tool", "status", "", DEFAULT_TIMEOUT);
        assert_eq!(inv.argv(), vec!["tool", "status"]);
    }

    #[test]
    fn blank_params_add_no_arguments() {
        let inv = Invocation::new("tool", "status", "   \t ", DEFAULT_TIMEOUT);
        assert_eq!(inv.argv(), vec!["tool", "status"]);
    }

    #[test]
    fn params_are_split_on_whitespace_in_order() {
        let inv = Invocation::new(
            "tailscale",
            "up",
            "  --accept-routes   --hostname=box\t--ssh ",
            DEFAULT_TIMEOUT,
        );
        assert_eq!(
            inv.argv(),
            vec![
                "tailscale",
                "up",
                "--accept-routes",
                "--hostname=box",
                "--ssh"
            ]
        );
    }

    #[test]
    fn unknown_commands_pass_through() {
        let inv = Invocation::new("tailscale", "  whois ", "100.64.0.2", DEFAULT_TIMEOUT);
        assert_eq!(inv.command, "whois");
        assert_eq!(inv.argv(), vec!["tailscale", "whois", "100.64.0.2"]);
    }

    #[test]
    fn command_line_joins_with_single_spaces() {
        let inv = Invocation::new("tailscale", "ping", "100.64.0.1", DEFAULT_TIMEOUT);
        assert_eq!(inv.command_line(), "tailscale ping 100.64.0.1");
    }

    #[test]
    fn default_timeout_is_sixty_seconds() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(60));
    }
}
