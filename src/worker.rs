//! Single-slot background worker for invocations.
//!
//! At most one invocation is in flight. A second submission is rejected with
//! [`WorkerError::Busy`] rather than queued, regardless of whether it came
//! from the run control or the accelerator key. Completions are delivered
//! through a channel and picked up by the owner's thread, so the worker never
//! touches display state.

use crate::dispatch::{self, CancelToken, FailureKind, Invocation, InvocationResult};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Submission errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WorkerError {
    /// An invocation is already running.
    #[error("a command is already running: {running}")]
    Busy { running: String },

    /// The worker thread could not be started.
    #[error("failed to start worker thread: {0}")]
    Spawn(String),
}

/// A finished invocation together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub invocation: Invocation,
    pub result: InvocationResult,
}

struct InFlight {
    invocation: Invocation,
    cancel: CancelToken,
    rx: Receiver<InvocationResult>,
    handle: JoinHandle<()>,
}

/// Owns the in-flight slot.
#[derive(Default)]
pub struct Worker {
    in_flight: Option<InFlight>,
}

impl Worker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while an invocation is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start `invocation` on a fresh background thread.
    pub fn submit(&mut self, invocation: Invocation) -> Result<(), WorkerError> {
        if let Some(running) = &self.in_flight {
            tracing::debug!(running = %running.invocation.command_line(), "worker.rejected_busy");
            return Err(WorkerError::Busy {
                running: running.invocation.command_line(),
            });
        }

        let cancel = CancelToken::new();
        let (tx, rx) = mpsc::channel();
        let job = invocation.clone();
        let token = cancel.clone();
        let handle = thread::Builder::new()
            .name("tailpanel-invocation".to_string())
            .spawn(move || {
                let result = dispatch::execute(&job, &token);
                // The receiver is gone only if the worker was dropped.
                let _ = tx.send(result);
            })
            .map_err(|e| WorkerError::Spawn(e.to_string()))?;

        tracing::debug!(command = %invocation.command_line(), "worker.submitted");
        self.in_flight = Some(InFlight {
            invocation,
            cancel,
            rx,
            handle,
        });
        Ok(())
    }

    /// Request cancellation of the in-flight invocation.
    ///
    /// Returns false when nothing is running.
    pub fn cancel(&self) -> bool {
        match &self.in_flight {
            Some(running) => {
                tracing::info!(command = %running.invocation.command_line(), "worker.cancel");
                running.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Take the completion if the in-flight invocation has finished.
    ///
    /// Each submission yields exactly one completion. If the worker thread
    /// died without reporting, the completion carries [`FailureKind::Other`].
    pub fn try_complete(&mut self) -> Option<Completion> {
        let received = match &self.in_flight {
            None => return None,
            Some(running) => match running.rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => lost_worker(),
            },
        };
        self.finish(received)
    }

    /// Block until the in-flight invocation finishes.
    pub fn wait(&mut self) -> Option<Completion> {
        let received = match &self.in_flight {
            None => return None,
            Some(running) => running.rx.recv().unwrap_or_else(|_| lost_worker()),
        };
        self.finish(received)
    }

    fn finish(&mut self, result: InvocationResult) -> Option<Completion> {
        let running = self.in_flight.take()?;
        // The thread has sent its result (or died), so this join is immediate.
        let _ = running.handle.join();
        tracing::debug!(
            command = %running.invocation.command_line(),
            exit_code = ?result.exit_code(),
            failure = ?result.failure_kind(),
            "worker.completed"
        );
        Some(Completion {
            invocation: running.invocation,
            result,
        })
    }
}

fn lost_worker() -> InvocationResult {
    tracing::warn!("worker.lost");
    InvocationResult::failed(
        FailureKind::Other,
        "worker thread exited without reporting a result",
    )
}
