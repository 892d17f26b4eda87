//! Configuration types for the diagnostic CLI.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{BridgeError, Result};

/// Output format for diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact JSON.
    Json,
    /// Pretty-printed JSON.
    Pretty,
}

impl FromStr for ReportFormat {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(BridgeError::config(format!(
                "Invalid report format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Diagnostics configuration.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Diagnostics configuration.
#[derive(Debug, Deserialize)]
pub struct DiagnosticsConfig {
    /// Report output format (text, json, pretty).
    #[serde(default = "default_format")]
    pub format: String,

    /// Include the per-device table in reports.
    #[serde(default = "default_devices")]
    pub devices: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            devices: default_devices(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

fn default_devices() -> bool {
    true
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
