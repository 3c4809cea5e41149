//! Config loading, validation, and override operations.

use super::model::Config;
use super::types::MAX_PRESETS;
use crate::error::{PanelError, Result};
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PanelError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PanelError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| PanelError::UserError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, tool: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        if let Some(tool) = tool {
            self.tool = tool;
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `tool` must be non-empty
    /// - `timeout_secs` and `probe_timeout_secs` must be positive
    /// - at most `MAX_PRESETS` presets, each with a non-empty label
    pub fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            return Err(PanelError::UserError(
                "config validation failed: tool must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(PanelError::UserError(
                "config validation failed: timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.probe_timeout_secs == 0 {
            return Err(PanelError::UserError(
                "config validation failed: probe_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.presets.len() > MAX_PRESETS {
            return Err(PanelError::UserError(format!(
                "config validation failed: at most {} presets are supported (found {})",
                MAX_PRESETS,
                self.presets.len()
            )));
        }

        for preset in &self.presets {
            if preset.label.trim().is_empty() {
                return Err(PanelError::UserError(format!(
                    "config validation failed: preset for '{}' has an empty label",
                    preset.command
                )));
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
