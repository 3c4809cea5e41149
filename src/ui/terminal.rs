//! Terminal setup and the interactive event loop.

use super::app::{Action, AppState};
use super::render;
use crate::config::Config;
use crate::error::{PanelError, Result};
use crate::probe::{self, ProbeOutcome};
use crate::worker::Worker;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// How long the loop waits for input before checking the worker again.
const TICK: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive surface until the user quits.
///
/// The tool is probed first; if it is missing, the install dialog is shown
/// and the main window is never built.
pub fn run(config: &Config) -> Result<()> {
    match probe::probe(&config.tool, config.probe_timeout()) {
        ProbeOutcome::NotInstalled => {
            with_terminal(|terminal| show_install_dialog(terminal, &config.tool))?;
            return Err(PanelError::ToolNotFound {
                tool: config.tool.clone(),
            });
        }
        // Logged by the probe; the main window still opens.
        ProbeOutcome::Inconclusive { .. } | ProbeOutcome::Available { .. } => {}
    }

    let app = AppState::new(config);
    with_terminal(|terminal| event_loop(terminal, app))
}

/// Restores the terminal when dropped, whichever setup step got furthest.
struct ScreenGuard<W: Write> {
    out: W,
}

impl<W: Write> ScreenGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        crossterm::execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for ScreenGuard<W> {
    fn drop(&mut self) {
        // Each step runs even if an earlier one failed.
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "terminal.raw_mode_restore_failed");
        }
        if let Err(e) = crossterm::execute!(self.out, LeaveAlternateScreen, Show) {
            tracing::warn!(error = %e, "terminal.screen_restore_failed");
        }
    }
}

fn with_terminal<F>(body: F) -> Result<()>
where
    F: FnOnce(&mut Term) -> Result<()>,
{
    let _guard = ScreenGuard::enter(io::stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    body(&mut terminal)
}

fn show_install_dialog<B: Backend>(terminal: &mut Terminal<B>, tool: &str) -> Result<()> {
    let instructions = probe::install_instructions(tool);
    loop {
        terminal.draw(|frame| render::draw_install_dialog(frame, tool, &instructions))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: AppState) -> Result<()> {
    let mut worker = Worker::new();

    loop {
        if let Some(done) = worker.try_complete() {
            app.finish(done);
        }

        terminal.draw(|frame| render::draw(frame, &app))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events, not release or repeat
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Action::None => {}
            Action::Submit => submit(&mut app, &mut worker),
            Action::Cancel => cancel(&mut app, &worker),
            Action::Quit => {
                if worker.cancel() {
                    worker.wait();
                }
                return Ok(());
            }
        }
    }
}

/// Hand the current inputs to the worker, respecting the submit gate.
pub(crate) fn submit(app: &mut AppState, worker: &mut Worker) {
    let Some(invocation) = app.begin_submit() else {
        return;
    };
    if let Err(err) = worker.submit(invocation.clone()) {
        app.submission_failed(invocation, err);
    }
}

pub(crate) fn cancel(app: &mut AppState, worker: &Worker) {
    if worker.cancel() {
        app.status = "Cancelling...".to_string();
    } else {
        app.status = "Nothing to cancel".to_string();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn screen_guard_leaves_alternate_screen_on_drop() {
        let mut out = Vec::new();
        drop(ScreenGuard { out: &mut out });

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }
}
