//! Interactive terminal surface.
//!
//! - **App**: window state, key handling, and the submit gate
//! - **Log**: the scrollable output pane
//! - **Render**: ratatui drawing of the window and its overlays
//! - **Terminal**: crossterm setup and the event loop that drives the worker

pub mod app;
pub mod log;
mod render;
mod terminal;


pub use terminal::run;
