//! Capture and client configuration.
//!
//! The dwell time before capture is deliberately fixed rather than
//! adaptive: it gives camera auto-exposure and focus a moment to
//! settle, trading responsiveness for a usable photo.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for camera capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Camera device index or identifier.
    pub device_id: u32,
    /// Requested frame width in pixels.
    pub width: u32,
    /// Requested frame height in pixels.
    pub height: u32,
    /// Settle time between opening the camera and grabbing the frame,
    /// in milliseconds.
    pub dwell_ms: u64,
    /// JPEG encoding quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: 640,
            height: 480,
            dwell_ms: 1500, // let exposure/focus settle
            jpeg_quality: 80,
        }
    }
}

impl CaptureConfig {
    /// Creates a configuration with a zero dwell time, for tests and
    /// other callers that must not block on the settle timer.
    pub fn immediate() -> Self {
        Self {
            dwell_ms: 0,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ConfigError::InvalidQuality);
        }
        Ok(())
    }
}

/// Connection settings for the recognition backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl BackendConfig {
    /// Validates the backend address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    #[error("invalid JPEG quality (must be 1-100)")]
    InvalidQuality,
    #[error("invalid backend base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.capture.validate()?;
        config.backend.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = CaptureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dwell_ms, 1500);
    }

    #[test]
    fn test_zero_dimensions_invalid() {
        let mut config = CaptureConfig::default();
        config.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_quality_out_of_range_invalid() {
        let mut config = CaptureConfig::default();
        config.jpeg_quality = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidQuality)));

        config.jpeg_quality = 101;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidQuality)));
    }

    #[test]
    fn test_immediate_has_no_dwell() {
        let config = CaptureConfig::immediate();
        assert_eq!(config.dwell_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_url_must_be_http() {
        let config = BackendConfig {
            base_url: "ftp://example.com".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(BackendConfig::default().validate().is_ok());
    }

    #[test]
    fn test_file_config_defaults_missing_sections() {
        let parsed: FileConfig =
            toml::from_str("[backend]\nbase_url = \"http://door:9000\"\n").expect("parse");
        assert_eq!(parsed.backend.base_url, "http://door:9000");
        assert_eq!(parsed.capture.width, 640);
    }
}
