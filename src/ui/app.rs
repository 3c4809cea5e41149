//! Interactive application state.
//!
//! `AppState` owns everything the window shows. Key handlers take it by
//! `&mut` and return an [`Action`] for the event loop to carry out against
//! the worker; the renderer only reads it.

use super::log::OutputLog;
use crate::catalog::{self, ToolCommand};
use crate::config::{Config, Preset};
use crate::dispatch::{FailureKind, Invocation, InvocationResult};
use crate::report::{self, Alert, SEPARATOR};
use crate::worker::{Completion, WorkerError};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Lines moved by PageUp/PageDown.
pub const PAGE_LINES: usize = 10;

/// Which input control receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Selector,
    Params,
}

/// A modal drawn over the main window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help(String),
    Alert(Alert),
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Cancel,
    Quit,
}

/// Window state: input controls, log, status line, and the submit gate.
#[derive(Debug, Clone)]
pub struct AppState {
    pub tool: String,
    pub timeout: Duration,
    pub presets: Vec<Preset>,
    pub command: ToolCommand,
    pub params: String,
    pub focus: Focus,
    pub log: OutputLog,
    pub status: String,
    pub overlay: Option<Overlay>,
    submit_enabled: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            tool: config.tool.clone(),
            timeout: config.timeout(),
            presets: config.presets.clone(),
            command: ToolCommand::default(),
            params: String::new(),
            focus: Focus::Params,
            log: OutputLog::new(),
            status: "Ready".to_string(),
            overlay: None,
            submit_enabled: true,
        };
        app.log.append_text(&welcome_message(&app.tool));
        app
    }

    /// Whether the run control accepts a submission.
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Select `command`, pre-filling its default parameters if it has any.
    pub fn select_command(&mut self, command: ToolCommand) {
        self.command = command;
        if let Some(defaults) = command.default_params() {
            self.params = defaults.to_string();
        }
    }

    /// Fill command and parameters from the preset at `index` and focus the
    /// parameter field. Returns false when there is no such preset.
    pub fn apply_preset(&mut self, index: usize) -> bool {
        let Some(preset) = self.presets.get(index) else {
            return false;
        };
        self.command = preset.command;
        self.params = preset.params.clone();
        self.focus = Focus::Params;
        true
    }

    /// The invocation the current inputs describe.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(
            self.tool.clone(),
            self.command.as_str(),
            self.params.trim(),
            self.timeout,
        )
    }

    /// Close the submit gate and return the invocation to dispatch.
    ///
    /// Returns `None`, leaving state untouched apart from the status line,
    /// while an invocation is already in flight.
    pub fn begin_submit(&mut self) -> Option<Invocation> {
        if !self.submit_enabled {
            self.status = "Busy: a command is already running (Ctrl+X to cancel)".to_string();
            return None;
        }
        let invocation = self.invocation();
        self.submit_enabled = false;
        self.status = format!("Running: {} ...", invocation.command_line());
        tracing::debug!(command = %invocation.command_line(), "ui.submit");
        Some(invocation)
    }

    /// The worker refused an invocation returned by [`Self::begin_submit`].
    pub fn submission_failed(&mut self, invocation: Invocation, err: WorkerError) {
        match err {
            WorkerError::Busy { running } => {
                // Something else holds the slot; its completion reopens the gate.
                self.status = format!("Busy: {} is still running", running);
            }
            WorkerError::Spawn(detail) => self.finish(Completion {
                invocation,
                result: InvocationResult::failed(FailureKind::Other, detail),
            }),
        }
    }

    /// Apply a finished invocation: append its report, update the status
    /// line, raise an alert if needed, and reopen the submit gate.
    pub fn finish(&mut self, completion: Completion) {
        let report = report::render(&completion.invocation, &completion.result);
        self.log.append_lines(report.lines);
        self.status = format!("{} at {}", report.status, Local::now().format("%H:%M:%S"));
        if let Some(alert) = report.alert {
            self.overlay = Some(Overlay::Alert(alert));
        }
        self.submit_enabled = true;
    }

    pub fn show_help(&mut self) {
        self.overlay = Some(Overlay::Help(catalog::help_text(&self.tool)));
    }

    /// Translate a key press into state changes and an action for the loop.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => return Action::Quit,
                _ => {}
            }
        }

        if self.overlay.is_some() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('q')
            ) {
                self.overlay = None;
            }
            return Action::None;
        }

        if ctrl {
            return match key.code {
                KeyCode::Char('x') => Action::Cancel,
                KeyCode::Char('l') => {
                    self.log.clear();
                    Action::None
                }
                KeyCode::Char('u') => {
                    self.params.clear();
                    Action::None
                }
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Enter => return Action::Submit,
            KeyCode::F(1) => self.show_help(),
            KeyCode::F(n @ 2..=9) => {
                self.apply_preset(usize::from(n - 2));
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Selector => Focus::Params,
                    Focus::Params => Focus::Selector,
                };
            }
            KeyCode::Up => self.select_command(self.command.prev()),
            KeyCode::Down => self.select_command(self.command.next()),
            KeyCode::PageUp => self.log.scroll_up(PAGE_LINES),
            KeyCode::PageDown => self.log.scroll_down(PAGE_LINES),
            KeyCode::Home => self.log.scroll_to_top(),
            KeyCode::End => self.log.scroll_to_bottom(),
            code => match self.focus {
                Focus::Selector => match code {
                    KeyCode::Left => self.select_command(self.command.prev()),
                    KeyCode::Right => self.select_command(self.command.next()),
                    KeyCode::Char(c) => {
                        self.focus = Focus::Params;
                        self.params.push(c);
                    }
                    _ => {}
                },
                Focus::Params => match code {
                    KeyCode::Char(c) => self.params.push(c),
                    KeyCode::Backspace => {
                        self.params.pop();
                    }
                    _ => {}
                },
            },
        }
        Action::None
    }
}

fn welcome_message(tool: &str) -> String {
    format!(
        "tailpanel: a terminal front-end for {tool}\n\
         \n\
         Usage:\n\
         - Pick a command with Up/Down and press Enter to run it\n\
         - F2..F9 fill in the preset shown in the preset row\n\
         - Type command parameters in the parameter field\n\
         \n\
         Examples:\n\
         - Network status:     status\n\
         - Connect:            up --accept-routes\n\
         - Check connectivity: netcheck\n\
         - Ping a node:        ping 100.64.0.1\n\
         - Show IP addresses:  ip\n\
         \n\
         F1 shows the command reference. Ctrl+X cancels a running command, Ctrl+Q quits.\n\
         {SEPARATOR}\n"
    )
}
