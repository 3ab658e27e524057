//! Plugin settings
//!
//! Settings can be built in code, loaded from a TOML, YAML or JSON file, and
//! adjusted from the environment.

use crate::error::{Error, Result};
use crate::markers::MarkerCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable toggling the generic marker
pub const ENV_GENERIC_MARKER: &str = "ARGUS_VALIDATION_GENERIC_MARKER";
/// Environment variable toggling violation counts in diagnostics
pub const ENV_REPORT_COUNT: &str = "ARGUS_VALIDATION_REPORT_COUNT";

/// Behaviour switches for the validation interceptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Treat the generic `Valid` marker as present in the environment
    pub recognize_generic_marker: bool,
    /// Include violation counts in post-validation diagnostics
    pub report_violation_count: bool,
    /// Redact secrets from argument renderings before logging them
    pub redact_values: bool,
    /// Maximum characters of an argument rendering to log
    pub max_logged_value_len: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            recognize_generic_marker: true,
            report_violation_count: true,
            redact_values: true,
            max_logged_value_len: 256,
        }
    }
}

impl ValidationSettings {
    /// Load settings from a file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        Ok(settings)
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(ENV_GENERIC_MARKER) {
            self.recognize_generic_marker = parse_flag(ENV_GENERIC_MARKER, &value)?;
        }
        if let Ok(value) = std::env::var(ENV_REPORT_COUNT) {
            self.report_violation_count = parse_flag(ENV_REPORT_COUNT, &value)?;
        }
        Ok(())
    }

    /// Marker catalog matching these settings
    pub fn marker_catalog(&self) -> MarkerCatalog {
        MarkerCatalog::with_generic_marker(self.recognize_generic_marker)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::settings(format!(
            "{} must be a boolean flag, got '{}'",
            name, other
        ))),
    }
}
