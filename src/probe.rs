//! Startup availability check for the wrapped tool.

use crate::dispatch::{self, CancelToken, FailureKind, Invocation, InvocationResult};
use std::time::Duration;

/// Outcome of running `<tool> version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The tool ran; carries the first line it printed, if any.
    Available { version: Option<String> },
    /// The executable could not be found.
    NotInstalled,
    /// The probe failed for another reason. Startup continues.
    Inconclusive { detail: String },
}

/// Run a lightweight version invocation of `tool`.
pub fn probe(tool: &str, timeout: Duration) -> ProbeOutcome {
    let invocation = Invocation::new(tool, "version", "", timeout);
    let outcome = match dispatch::execute(&invocation, &CancelToken::new()) {
        InvocationResult::Completed(run) => ProbeOutcome::Available {
            version: run
                .stdout
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string),
        },
        InvocationResult::Failed(f) if f.kind == FailureKind::NotFound => ProbeOutcome::NotInstalled,
        InvocationResult::Failed(f) => ProbeOutcome::Inconclusive { detail: f.detail },
    };

    match &outcome {
        ProbeOutcome::Available { version } => {
            tracing::info!(tool, version = version.as_deref().unwrap_or("unknown"), "probe.available")
        }
        ProbeOutcome::NotInstalled => tracing::warn!(tool, "probe.not_installed"),
        ProbeOutcome::Inconclusive { detail } => {
            tracing::warn!(tool, detail = %detail, "probe.inconclusive")
        }
    }
    outcome
}

/// Installation instructions shown when the tool is missing.
pub fn install_instructions(tool: &str) -> String {
    format!(
        "No {tool} installation was detected. Install it first:\n\n\
         1. Download it from https://tailscale.com/download\n\
         2. Make sure the `{tool}` command is on your PATH\n\
         3. Start tailpanel again"
    )
}
