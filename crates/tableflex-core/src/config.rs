//! Interaction configuration.

use crate::border::DEFAULT_CARET_OFFSET;
use crate::input::{DOUBLE_CLICK_DISTANCE, DOUBLE_CLICK_TIME_MS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which axes can be resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeAxes {
    pub columns: bool,
    pub rows: bool,
}

impl Default for ResizeAxes {
    fn default() -> Self {
        Self {
            columns: true,
            rows: true,
        }
    }
}

/// Where column borders can be grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeZone {
    /// Header band only.
    Header,
    /// Body cells only.
    Body,
    #[default]
    Anywhere,
}

/// Settings for [`GridInteraction`](crate::GridInteraction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Distance from a border that counts as near.
    pub caret_offset: f64,
    pub axes: ResizeAxes,
    pub column_zone: ResizeZone,
    /// Height of the header band; zero hides it.
    pub header_height: f64,
    pub double_click_ms: u64,
    pub double_click_distance: f64,
    /// Whether interaction starts enabled.
    pub enabled: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            caret_offset: DEFAULT_CARET_OFFSET,
            axes: ResizeAxes::default(),
            column_zone: ResizeZone::default(),
            header_height: 0.0,
            double_click_ms: DOUBLE_CLICK_TIME_MS,
            double_click_distance: DOUBLE_CLICK_DISTANCE,
            enabled: true,
        }
    }
}

impl InteractionConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.caret_offset.is_nan() || self.caret_offset <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "caret_offset must be positive, got {}",
                self.caret_offset
            )));
        }
        if self.header_height.is_nan() || self.header_height < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "header_height must not be negative, got {}",
                self.header_height
            )));
        }
        if self.double_click_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "double_click_distance must not be negative".to_string(),
            ));
        }
        if self.column_zone == ResizeZone::Header && self.header_height == 0.0 && self.axes.columns {
            return Err(ConfigError::Invalid(
                "column_zone is header but the header is hidden".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = InteractionConfig::default();
        assert!((config.caret_offset - 10.0).abs() < f64::EPSILON);
        assert!(config.axes.columns && config.axes.rows);
        assert_eq!(config.column_zone, ResizeZone::Anywhere);
        assert!(config.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = InteractionConfig::from_json(r#"{ "caret_offset": 7, "axes": { "rows": false } }"#).unwrap();
        assert!((config.caret_offset - 7.0).abs() < f64::EPSILON);
        assert!(config.axes.columns);
        assert!(!config.axes.rows);
        assert_eq!(config.double_click_ms, 500);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let result = InteractionConfig::from_json(r#"{ "caret_offset": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_nan_sizes() {
        let config = InteractionConfig {
            caret_offset: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = InteractionConfig {
            header_height: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_header_zone_needs_header() {
        let result = InteractionConfig::from_json(r#"{ "column_zone": "header" }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config =
            InteractionConfig::from_json(r#"{ "column_zone": "header", "header_height": 30 }"#).unwrap();
        assert_eq!(config.column_zone, ResizeZone::Header);
    }

    #[test]
    fn test_parse_error() {
        let result = InteractionConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "enabled": false }}"#).unwrap();
        let config = InteractionConfig::load(file.path()).unwrap();
        assert!(!config.enabled);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = InteractionConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
