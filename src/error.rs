//! Error types for tailpanel.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for tailpanel operations.
///
/// Each variant maps to a process exit code in [`exit_codes`].
#[derive(Error, Debug)]
pub enum PanelError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The wrapped tool is not installed or not on PATH.
    #[error("'{tool}' command not found\nFix: install it and make sure it is on your PATH.")]
    ToolNotFound { tool: String },

    /// An invocation timed out, was cancelled, or could not be launched.
    #[error("Invocation failed: {0}")]
    InvocationFailed(String),

    /// Terminal setup, drawing, or input failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl PanelError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PanelError::UserError(_) => exit_codes::USER_ERROR,
            PanelError::ToolNotFound { .. } => exit_codes::TOOL_NOT_FOUND,
            PanelError::InvocationFailed(_) => exit_codes::INVOCATION_FAILURE,
            PanelError::Terminal(_) => exit_codes::TERMINAL_FAILURE,
        }
    }
}

/// Result type alias for tailpanel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = PanelError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn tool_not_found_has_correct_exit_code() {
        let err = PanelError::ToolNotFound {
            tool: "tailscale".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::TOOL_NOT_FOUND);
    }

    #[test]
    fn invocation_failed_has_correct_exit_code() {
        let err = PanelError::InvocationFailed("timed out".to_string());
        assert_eq!(err.exit_code(), exit_codes::INVOCATION_FAILURE);
    }

    #[test]
    fn io_errors_convert_to_terminal_errors() {
        let io = std::io::Error::other("no tty");
        let err: PanelError = io.into();
        assert_eq!(err.exit_code(), exit_codes::TERMINAL_FAILURE);
        assert_eq!(err.to_string(), "Terminal error: no tty");
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = PanelError::ToolNotFound {
            tool: "tailscale".to_string(),
        };
        assert!(err.to_string().starts_with("'tailscale' command not found"));
        assert!(err.to_string().contains("Fix:"));

        let err = PanelError::InvocationFailed("timed out after 60s".to_string());
        assert_eq!(err.to_string(), "Invocation failed: timed out after 60s");
    }
}
