//! Invocation results.

use std::fmt;
use std::time::Duration;

/// Why an invocation did not produce an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The tool executable could not be found.
    NotFound,
    /// The child ran past its timeout and was killed.
    TimedOut,
    /// Cancellation was requested and the child was killed.
    Cancelled,
    /// Any other launch or runtime error.
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::NotFound => "not found",
            FailureKind::TimedOut => "timed out",
            FailureKind::Cancelled => "cancelled",
            FailureKind::Other => "error",
        };
        f.write_str(s)
    }
}

/// Captured output of a child that exited on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    /// Process exit code; -1 if the child ended without one.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl CompletedRun {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// A failed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationFailure {
    pub kind: FailureKind,
    pub detail: String,
}

/// Result of one invocation. Produced once by the executor and consumed once
/// by whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    Completed(CompletedRun),
    Failed(InvocationFailure),
}

impl InvocationResult {
    pub fn failed(kind: FailureKind, detail: impl Into<String>) -> Self {
        InvocationResult::Failed(InvocationFailure {
            kind,
            detail: detail.into(),
        })
    }

    /// The failure kind, if the invocation failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            InvocationResult::Completed(_) => None,
            InvocationResult::Failed(f) => Some(f.kind),
        }
    }

    /// The exit code, if the child exited on its own.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            InvocationResult::Completed(run) => Some(run.exit_code),
            InvocationResult::Failed(_) => None,
        }
    }
}
