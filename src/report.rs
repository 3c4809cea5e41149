//! Rendering of invocation outcomes into log text.
//!
//! The interactive log and `tailpanel run` print the same report, so the
//! formatting lives here rather than in either front-end.

use crate::dispatch::{CompletedRun, FailureKind, Invocation, InvocationResult};

/// Line drawn before and after each result block.
pub const SEPARATOR: &str = "==================================================";

/// A modal message for failures that need the user's attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Everything a front-end shows for one finished invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Lines to append to the output log, without trailing newlines.
    pub lines: Vec<String>,
    /// Text for the status line.
    pub status: String,
    /// Present for failures that warrant a modal dialog.
    pub alert: Option<Alert>,
}

impl Report {
    /// The log lines joined with newlines, ending in a newline.
    pub fn text(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Build the report for `result`, produced by running `invocation`.
pub fn render(invocation: &Invocation, result: &InvocationResult) -> Report {
    let mut lines = vec![format!("$ {}", invocation.command_line()), SEPARATOR.to_string()];

    let (status, alert) = match result {
        InvocationResult::Completed(run) => {
            push_completed(&mut lines, run);
            (
                format!(
                    "Command finished (exit code: {}) in {:.2}s",
                    run.exit_code,
                    run.duration.as_secs_f64()
                ),
                None,
            )
        }
        InvocationResult::Failed(failure) => {
            let (message, status, alert_title) = match failure.kind {
                FailureKind::NotFound => (
                    format!("Error: {}", failure.detail),
                    format!("Error: {} not found", invocation.tool),
                    Some("Tool not found"),
                ),
                FailureKind::TimedOut => (
                    format!("Error: {}", failure.detail),
                    "Error: timed out".to_string(),
                    None,
                ),
                FailureKind::Cancelled => (
                    format!("Cancelled: {}", failure.detail),
                    "Cancelled".to_string(),
                    None,
                ),
                FailureKind::Other => (
                    format!("Unexpected error: {}", failure.detail),
                    "Error: unexpected failure".to_string(),
                    Some("Unexpected error"),
                ),
            };
            lines.push(message.clone());
            let alert = alert_title.map(|title| Alert {
                title: title.to_string(),
                message,
            });
            (status, alert)
        }
    };

    lines.push(SEPARATOR.to_string());
    Report {
        lines,
        status,
        alert,
    }
}

fn push_completed(lines: &mut Vec<String>, run: &CompletedRun) {
    if run.is_success() {
        if !run.stdout.is_empty() {
            lines.push("Output:".to_string());
            push_stream(lines, &run.stdout);
        }
        if !run.stderr.is_empty() {
            lines.push("Warnings:".to_string());
            push_stream(lines, &run.stderr);
        }
    } else {
        lines.push("Errors:".to_string());
        push_stream(lines, &run.stderr);
        if !run.stdout.is_empty() {
            lines.push("Standard output:".to_string());
            push_stream(lines, &run.stdout);
        }
    }
}

fn push_stream(lines: &mut Vec<String>, text: &str) {
    lines.extend(text.lines().map(str::to_string));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DEFAULT_TIMEOUT;
    use std::time::Duration;

    fn status_invocation() -> Invocation {
        Invocation::new("tool", "status", "", DEFAULT_TIMEOUT)
    }

    fn completed(exit_code: i32, stdout: &str, stderr: &str) -> InvocationResult {
        InvocationResult::Completed(CompletedRun {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            duration: Duration::from_millis(12),
        })
    }

    fn position(lines: &[String], needle: &str) -> usize {
        lines
            .iter()
            .position(|l| l == needle)
            .unwrap_or_else(|| panic!("{:?} not in {:?}", needle, lines))
    }

    #[test]
    fn success_echoes_command_then_output_then_status() {
        let report = render(&status_invocation(), &completed(0, "Logged in.\n", ""));

        assert_eq!(report.lines[0], "$ tool status");
        assert_eq!(report.lines[1], SEPARATOR);
        assert!(position(&report.lines, "Logged in.") > 0);
        assert_eq!(report.lines.last().unwrap(), SEPARATOR);
        assert_eq!(report.status, "Command finished (exit code: 0) in 0.01s");
        assert!(report.alert.is_none());
        assert!(!report.lines.iter().any(|l| l == "Warnings:"));
    }

    #[test]
    fn success_with_stderr_adds_warnings_after_output() {
        let report = render(
            &status_invocation(),
            &completed(0, "100.64.0.3\n", "Warning: client version mismatch\n"),
        );

        let output = position(&report.lines, "Output:");
        let warnings = position(&report.lines, "Warnings:");
        assert!(output < warnings);
        assert!(position(&report.lines, "Warning: client version mismatch") > warnings);
    }

    #[test]
    fn nonzero_exit_shows_errors_then_stdout() {
        let report = render(
            &status_invocation(),
            &completed(1, "partial\n", "Logged out.\n"),
        );

        let errors = position(&report.lines, "Errors:");
        let stdout = position(&report.lines, "Standard output:");
        assert!(errors < position(&report.lines, "Logged out."));
        assert!(errors < stdout);
        assert!(position(&report.lines, "partial") > stdout);
        assert!(report.status.starts_with("Command finished (exit code: 1)"));
        assert!(report.alert.is_none());
    }

    #[test]
    fn nonzero_exit_without_stdout_has_no_stdout_header() {
        let report = render(&status_invocation(), &completed(2, "", "bad flag\n"));
        assert!(!report.lines.iter().any(|l| l == "Standard output:"));
    }

    #[test]
    fn not_found_raises_an_alert() {
        let result = InvocationResult::failed(FailureKind::NotFound, "'tool' command not found.");
        let report = render(&status_invocation(), &result);

        assert_eq!(report.status, "Error: tool not found");
        let alert = report.alert.unwrap();
        assert_eq!(alert.title, "Tool not found");
        assert!(report.lines.contains(&alert.message));
    }

    #[test]
    fn timeout_has_no_alert() {
        let result = InvocationResult::failed(
            FailureKind::TimedOut,
            "command timed out (exceeded 60 seconds)",
        );
        let report = render(&status_invocation(), &result);

        assert_eq!(report.status, "Error: timed out");
        assert!(report.alert.is_none());
        assert!(
            report
                .lines
                .contains(&"Error: command timed out (exceeded 60 seconds)".to_string())
        );
    }

    #[test]
    fn other_failure_raises_an_alert() {
        let result = InvocationResult::failed(FailureKind::Other, "permission denied");
        let report = render(&status_invocation(), &result);

        assert_eq!(report.status, "Error: unexpected failure");
        assert_eq!(
            report.alert.unwrap().message,
            "Unexpected error: permission denied"
        );
    }

    #[test]
    fn cancelled_has_no_alert() {
        let result = InvocationResult::failed(FailureKind::Cancelled, "stopped");
        let report = render(&status_invocation(), &result);
        assert_eq!(report.status, "Cancelled");
        assert!(report.alert.is_none());
    }

    #[test]
    fn text_ends_with_newline() {
        let report = render(&status_invocation(), &completed(0, "ok\n", ""));
        let text = report.text();
        assert!(text.starts_with("$ tool status\n"));
        assert!(text.ends_with(&format!("{}\n", SEPARATOR)));
    }
}
