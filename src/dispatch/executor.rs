//! Tool subprocess executor.
//!
//! Runs an [`Invocation`] with captured text output, a hard timeout, and
//! cancellation. Output is buffered and returned only after the child exits.
//!
//! The timeout bounds the whole call, including draining the output pipes: a
//! background process that inherits the pipes and outlives the child cannot
//! hold the caller past the deadline.

use super::cancel::CancelToken;
use super::invocation::Invocation;
use super::outcome::{CompletedRun, FailureKind, InvocationResult};
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How the wait loop ended.
enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut,
    Cancelled,
}

type Reader = Receiver<io::Result<Vec<u8>>>;

/// Run the invocation to completion, timeout, or cancellation.
///
/// Never panics and never returns early with an error: every way the child
/// can fail is folded into the returned [`InvocationResult`].
pub fn execute(invocation: &Invocation, cancel: &CancelToken) -> InvocationResult {
    let command_line = invocation.command_line();
    tracing::debug!(command = %command_line, timeout_ms = invocation.timeout.as_millis() as u64, "dispatch.spawn");

    let mut command = Command::new(&invocation.tool);
    command
        .arg(&invocation.command)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    suppress_console_window(&mut command);

    let start = Instant::now();
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(tool = %invocation.tool, "dispatch.not_found");
            return InvocationResult::failed(
                FailureKind::NotFound,
                format!(
                    "'{}' command not found. Make sure it is installed and on your PATH.",
                    invocation.tool
                ),
            );
        }
        Err(e) => {
            tracing::warn!(command = %command_line, error = %e, "dispatch.spawn_failed");
            return InvocationResult::failed(
                FailureKind::Other,
                format!("failed to launch '{}': {}", invocation.tool, e),
            );
        }
    };

    // Both pipes are drained concurrently so a child writing a lot of output
    // cannot block on a full pipe while we wait for it.
    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let deadline = start + invocation.timeout;
    let waited = wait_with_timeout(&mut child, invocation.timeout, cancel);

    // Readers still blocked on a pipe when this returns are left detached.
    match waited {
        Ok(WaitOutcome::Exited(status)) => {
            let stdout = collect(stdout_reader.as_ref(), deadline);
            let stderr = collect(stderr_reader.as_ref(), deadline);
            let (Some(stdout), Some(stderr)) = (stdout, stderr) else {
                tracing::warn!(command = %command_line, "dispatch.pipes_held_open");
                return timed_out(invocation);
            };
            let duration = start.elapsed();
            let exit_code = status.code().unwrap_or(-1);
            tracing::info!(command = %command_line, exit_code, elapsed_ms = duration.as_millis() as u64, "dispatch.exited");
            InvocationResult::Completed(CompletedRun {
                exit_code,
                stdout,
                stderr,
                duration,
            })
        }
        Ok(WaitOutcome::TimedOut) => {
            tracing::warn!(command = %command_line, "dispatch.timed_out");
            timed_out(invocation)
        }
        Ok(WaitOutcome::Cancelled) => {
            tracing::info!(command = %command_line, "dispatch.cancelled");
            InvocationResult::failed(FailureKind::Cancelled, "command cancelled before it finished")
        }
        Err(e) => {
            tracing::warn!(command = %command_line, error = %e, "dispatch.wait_failed");
            InvocationResult::failed(
                FailureKind::Other,
                format!("failed to check process status: {}", e),
            )
        }
    }
}

fn timed_out(invocation: &Invocation) -> InvocationResult {
    InvocationResult::failed(
        FailureKind::TimedOut,
        format!(
            "command timed out (exceeded {})",
            describe_duration(invocation.timeout)
        ),
    )
}

/// Wait for a child process, killing it on timeout or cancellation.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    cancel: &CancelToken,
) -> io::Result<WaitOutcome> {
    let start = Instant::now();

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(WaitOutcome::Exited(status));
        }
        if cancel.is_cancelled() {
            kill_process(child);
            return Ok(WaitOutcome::Cancelled);
        }
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            kill_process(child);
            return Ok(WaitOutcome::TimedOut);
        }
        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}

/// Kill a process and reap it.
fn kill_process(child: &mut Child) {
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R>(source: Option<R>) -> Option<Reader>
where
    R: Read + Send + 'static,
{
    source.map(|mut source| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let result = source.read_to_end(&mut buf).map(|_| buf);
            // The receiver is gone if the deadline passed first.
            let _ = tx.send(result);
        });
        rx
    })
}

/// Receive a reader's output, giving up at `deadline`.
///
/// Returns `None` when the pipe is still open at the deadline. A child that
/// exits right at the deadline still gets one poll interval to flush.
fn collect(reader: Option<&Reader>, deadline: Instant) -> Option<String> {
    let Some(reader) = reader else {
        return Some(String::new());
    };
    let wait = deadline
        .saturating_duration_since(Instant::now())
        .max(POLL_INTERVAL);
    let bytes = match reader.recv_timeout(wait) {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "dispatch.read_failed");
            Vec::new()
        }
        Err(RecvTimeoutError::Timeout) => return None,
        Err(RecvTimeoutError::Disconnected) => Vec::new(),
    };
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

fn describe_duration(d: Duration) -> String {
    if d.subsec_millis() == 0 {
        format!("{} seconds", d.as_secs())
    } else {
        format!("{} ms", d.as_millis())
    }
}

#[cfg(windows)]
fn suppress_console_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn suppress_console_window(_command: &mut Command) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn invocation(tool: &str, command: &str, params: &str, timeout: Duration) -> Invocation {
        Invocation::new(tool, command, params, timeout)
    }

    fn completed(result: InvocationResult) -> CompletedRun {
        match result {
            InvocationResult::Completed(run) => run,
            InvocationResult::Failed(f) => panic!("expected completion, got {:?}", f),
        }
    }

    #[test]
    fn test_execute_captures_stdout() {
        let inv = invocation("echo", "hello", "world", Duration::from_secs(10));
        let run = completed(execute(&inv, &CancelToken::new()));

        assert!(run.is_success());
        assert_eq!(run.stdout, "hello world\n");
        assert!(run.stderr.is_empty());
    }

    #[test]
    fn test_execute_nonzero_exit() {
        let inv = invocation("false", "ignored", "", Duration::from_secs(10));
        let run = completed(execute(&inv, &CancelToken::new()));

        assert!(!run.is_success());
        assert_eq!(run.exit_code, 1);
    }

    #[test]
    fn test_execute_captures_stderr() {
        let inv = invocation(
            "ls",
            "/nonexistent_path_for_tailpanel_tests",
            "",
            Duration::from_secs(10),
        );
        let run = completed(execute(&inv, &CancelToken::new()));

        assert_ne!(run.exit_code, 0);
        assert!(!run.stderr.is_empty());
    }

    #[test]
    fn test_execute_not_found() {
        let inv = invocation(
            "nonexistent_tool_xyz_123",
            "status",
            "",
            Duration::from_secs(10),
        );
        let result = execute(&inv, &CancelToken::new());

        assert_eq!(result.failure_kind(), Some(FailureKind::NotFound));
        match result {
            InvocationResult::Failed(f) => assert!(f.detail.contains("nonexistent_tool_xyz_123")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_execute_timeout() {
        let inv = invocation("sleep", "10", "", Duration::from_millis(300));
        let start = Instant::now();
        let result = execute(&inv, &CancelToken::new());

        assert_eq!(result.failure_kind(), Some(FailureKind::TimedOut));
        assert!(start.elapsed() < Duration::from_secs(5));
        match result {
            InvocationResult::Failed(f) => assert!(f.detail.contains("300 ms")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_execute_timeout_with_background_process_holding_pipes() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("forks.sh");
        std::fs::write(&script, "sleep 8 &\necho started\n").unwrap();

        let inv = invocation(
            "sh",
            script.to_str().unwrap(),
            "",
            Duration::from_secs(1),
        );
        let start = Instant::now();
        let result = execute(&inv, &CancelToken::new());

        assert!(
            start.elapsed() < Duration::from_secs(4),
            "execute blocked {:?} with a 1s timeout",
            start.elapsed()
        );
        assert_eq!(result.failure_kind(), Some(FailureKind::TimedOut));
    }

    #[test]
    fn test_execute_cancelled() {
        let inv = invocation("sleep", "10", "", Duration::from_secs(30));
        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            trigger.cancel();
        });

        let start = Instant::now();
        let result = execute(&inv, &cancel);
        canceller.join().unwrap();

        assert_eq!(result.failure_kind(), Some(FailureKind::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_execute_large_output_does_not_stall() {
        let inv = invocation("seq", "1", "200000", Duration::from_secs(30));
        let run = completed(execute(&inv, &CancelToken::new()));

        assert!(run.is_success());
        assert!(run.stdout.ends_with("200000\n"));
        assert_eq!(run.stdout.lines().count(), 200000);
    }

    #[test]
    fn test_describe_duration() {
        assert_eq!(describe_duration(Duration::from_secs(60)), "60 seconds");
        assert_eq!(describe_duration(Duration::from_millis(1500)), "1500 ms");
    }
}
