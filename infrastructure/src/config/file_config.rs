//! Configuration file schema

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`FileConfig::validate`]
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("backend.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("backend.timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the classification/auth service.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://backend-production-4c9e.up.railway.app".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Camera capture settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Video device passed to the capture tool (default `/dev/video0`).
    pub device: Option<String>,
}

/// Root configuration file schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub backend: BackendConfig,
    pub capture: CaptureConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let url = &self.backend.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(url.clone()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = FileConfig::default();
        config.backend.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = FileConfig::default();
        config.backend.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::ZeroTimeout)
        ));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: FileConfig =
            toml::from_str("[backend]\nbase_url = \"http://localhost:8000\"\n").unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.capture.device.is_none());
    }
}
