//! Configuration model for tailpanel.
//!
//! This module defines the Config struct read from an optional YAML file
//! passed with `--config`. It supports forward-compatible YAML parsing
//! (unknown fields are ignored), sensible defaults for optional fields,
//! validation of config values, and command-line overrides.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::Preset;
