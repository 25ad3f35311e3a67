// File: rusty-validator/src/settings.rs
// Purpose: File-backed validator settings (validator.toml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::DEFAULT_ERROR_MARKER;

/// Validator settings
///
/// Every key is optional; a missing or blank file yields the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatorSettings {
    /// Interaction events that re-validate the field they occur on
    #[serde(default = "default_events")]
    pub events: Vec<String>,

    /// Marker applied to errored fields
    #[serde(default = "default_error_marker")]
    pub error_marker: String,

    /// Pixels kept above a hidden errored field when scrolling to it
    #[serde(default = "default_scroll_offset")]
    pub scroll_offset: f64,

    #[serde(default)]
    pub flash: FlashSettings,

    /// Extra pattern rules, merged in declaration order
    #[serde(default)]
    pub formats: Vec<FormatSettings>,
}

/// Error flash timeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashSettings {
    #[serde(default = "default_toggles")]
    pub toggles: u32,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// A pattern rule declared in settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatSettings {
    pub name: String,

    pub pattern: String,

    #[serde(default = "default_false")]
    pub case_insensitive: bool,
}

// Default values
fn default_events() -> Vec<String> {
    vec!["keyup".to_string(), "blur".to_string()]
}

fn default_error_marker() -> String {
    DEFAULT_ERROR_MARKER.to_string()
}

fn default_scroll_offset() -> f64 {
    50.0
}

fn default_toggles() -> u32 {
    8
}

fn default_interval_ms() -> u64 {
    100
}

fn default_false() -> bool {
    false
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            events: default_events(),
            error_marker: default_error_marker(),
            scroll_offset: default_scroll_offset(),
            flash: FlashSettings::default(),
            formats: Vec::new(),
        }
    }
}

impl Default for FlashSettings {
    fn default() -> Self {
        Self {
            toggles: default_toggles(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl FlashSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl ValidatorSettings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))
    }

    /// Load settings from the default path (./validator.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("validator.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_settings() {
        let settings = ValidatorSettings::default();
        assert_eq!(settings.events, vec!["keyup", "blur"]);
        assert_eq!(settings.error_marker, "validator-error");
        assert_eq!(settings.scroll_offset, 50.0);
        assert_eq!(settings.flash.toggles, 8);
        assert_eq!(settings.flash.interval(), Duration::from_millis(100));
        assert!(settings.formats.is_empty());
    }

    #[test]
    fn test_empty_settings() {
        let settings = ValidatorSettings::from_toml_str("  \n").unwrap();
        assert_eq!(settings, ValidatorSettings::default());
    }

    #[test]
    fn test_custom_settings() {
        let toml = r#"
            events = ["change"]
            error_marker = "is-invalid"

            [flash]
            toggles = 4

            [[formats]]
            name = "zip"
            pattern = '^\d{5}$'

            [[formats]]
            name = "hex"
            pattern = '^[0-9a-f]+$'
            case_insensitive = true
        "#;
        let settings = ValidatorSettings::from_toml_str(toml).unwrap();

        assert_eq!(settings.events, vec!["change"]);
        assert_eq!(settings.error_marker, "is-invalid");
        assert_eq!(settings.scroll_offset, 50.0);
        assert_eq!(settings.flash.toggles, 4);
        assert_eq!(settings.flash.interval_ms, 100);

        let names: Vec<&str> = settings.formats.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zip", "hex"]);
        assert!(!settings.formats[0].case_insensitive);
        assert!(settings.formats[1].case_insensitive);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = ValidatorSettings::load("does/not/exist/validator.toml").unwrap();
        assert_eq!(settings, ValidatorSettings::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("rusty-validator-{}.toml", std::process::id()));
        fs::write(
            &path,
            "error_marker = \"is-invalid\"\nscroll_offset = 80.0\n\n[flash]\ninterval_ms = 120\n",
        )
        .unwrap();

        let settings = ValidatorSettings::load(&path);
        fs::remove_file(&path).unwrap();
        let settings = settings.unwrap();

        assert_eq!(settings.error_marker, "is-invalid");
        assert_eq!(settings.scroll_offset, 80.0);
        assert_eq!(settings.flash.toggles, 8);
        assert_eq!(settings.flash.interval(), Duration::from_millis(120));
        assert_eq!(settings.events, vec!["keyup", "blur"]);
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let path = std::env::temp_dir().join(format!("rusty-validator-bad-{}.toml", std::process::id()));
        fs::write(&path, "events = 3\n").unwrap();

        let err = ValidatorSettings::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn test_load_default_without_file() {
        // the crate root carries no validator.toml
        assert_eq!(ValidatorSettings::load_default().unwrap(), ValidatorSettings::default());
    }

    #[test]
    fn test_invalid_settings() {
        assert!(ValidatorSettings::from_toml_str("events = 3").is_err());
    }
}
