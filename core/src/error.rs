//! Error types for llama-bridge.
//!
//! These errors never cross the C ABI: every exported entry point has a
//! total, fail-soft contract. They exist for the Rust-facing surface only
//! (configuration loading and the diagnostic CLI).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for llama-bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur on the Rust-facing side of the facade.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

impl BridgeError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BridgeError::config("unknown output format");
        assert_eq!(
            format!("{}", err),
            "Configuration error: unknown output format"
        );

        let err = BridgeError::FileNotFound(PathBuf::from("/etc/llama-bridge.yaml"));
        assert_eq!(format!("{}", err), "File not found: /etc/llama-bridge.yaml");
    }
}
