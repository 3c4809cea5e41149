//! Diagnostic logging setup.
//!
//! The interactive surface owns the terminal, so it only logs when a file is
//! given. Headless commands log to stderr by default.

use crate::error::{PanelError, Result};
use clap::ValueEnum;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    File(&'a Path),
    Stderr,
    Disabled,
}

/// Choose the sink for a run of the program.
pub fn sink_for(log_file: Option<&Path>, interactive: bool) -> LogSink<'_> {
    match (log_file, interactive) {
        (Some(path), _) => LogSink::File(path),
        (None, true) => LogSink::Disabled,
        (None, false) => LogSink::Stderr,
    }
}

/// Install the global subscriber.
pub fn init(sink: LogSink<'_>, level: LogLevel) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(Level::from(level))
        .with_target(false);

    let installed = match sink {
        LogSink::Disabled => return Ok(()),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    PanelError::UserError(format!(
                        "failed to open log file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| PanelError::UserError(format!("failed to initialize logging: {}", e)))
}
