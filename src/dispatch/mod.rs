//! Tool subprocess dispatch.
//!
//! This module turns a command name and a raw parameter string into a child
//! process of the wrapped tool:
//!
//! - Whitespace-split parameters appended after `[tool, command]`
//! - Captured stdout/stderr decoded as text
//! - Hard timeout with process termination
//! - Cooperative cancellation
//! - Console-window suppression on Windows

mod cancel;
mod executor;
mod invocation;
mod outcome;

pub use cancel::CancelToken;
pub use executor::execute;
pub use invocation::{DEFAULT_TIMEOUT, Invocation};
pub use outcome::{CompletedRun, FailureKind, InvocationResult};
