//! Layout settings loaded from TOML
//!
//! [`LayoutSettings`] holds the tuning knobs of the drag-and-drop layer and
//! the edge-move share. Every field has a default, so a settings file only
//! needs the keys it overrides:
//!
//! ```toml
//! pointer_activation_distance = 12.0
//! drop_zone_ratio = 0.3
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::EDGE_PANEL_SHARE;
use crate::tracing::span_names;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PANELDECK_CONFIG_DIR";

/// File name of the settings file inside the configuration directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`LayoutSettings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// One or more values are out of range.
    #[error("invalid settings: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Result type for settings operations.
pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Tuning knobs of the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Pixels a mouse or pen must travel before a press becomes a drag.
    pub pointer_activation_distance: f64,
    /// Milliseconds a finger must rest before a touch becomes a drag.
    pub touch_activation_delay_ms: u64,
    /// Pixels a finger may drift during the hold before the press counts as
    /// a scroll.
    pub touch_tolerance: f64,
    /// Fraction of a tab group's width or height covered by each
    /// directional drop band.
    pub drop_zone_ratio: f64,
    /// Thickness in pixels of the screen-edge drop rails.
    pub edge_rail_thickness: f64,
    /// Share of the screen a panel moved to an edge receives.
    pub edge_panel_share: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            pointer_activation_distance: 8.0,
            touch_activation_delay_ms: 250,
            touch_tolerance: 5.0,
            drop_zone_ratio: 0.25,
            edge_rail_thickness: 16.0,
            edge_panel_share: EDGE_PANEL_SHARE,
        }
    }
}

impl LayoutSettings {
    /// Parses settings from a TOML string and validates them.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml(s: &str) -> SettingsResult<Self> {
        let settings: Self = toml::from_str(s)?;
        let problems = settings.validate();
        if problems.is_empty() {
            Ok(settings)
        } else {
            Err(SettingsError::Invalid(problems))
        }
    }

    /// Loads settings from a file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let _span =
            crate::trace_operation_debug!(span_names::SETTINGS_LOAD, path = %path.display())
                .entered();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Loads `settings.toml` from a configuration directory.
    ///
    /// # Errors
    ///
    /// See [`LayoutSettings::load`].
    pub fn load_from_dir(dir: &Path) -> SettingsResult<Self> {
        Self::load(&dir.join(SETTINGS_FILE_NAME))
    }

    /// Serializes the settings to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the settings to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Returns a description of every out-of-range value.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.pointer_activation_distance.is_finite() || self.pointer_activation_distance < 0.0
        {
            problems.push(format!(
                "pointer_activation_distance must be >= 0, got {}",
                self.pointer_activation_distance
            ));
        }
        if !self.touch_tolerance.is_finite() || self.touch_tolerance < 0.0 {
            problems.push(format!(
                "touch_tolerance must be >= 0, got {}",
                self.touch_tolerance
            ));
        }
        if !(self.drop_zone_ratio > 0.0 && self.drop_zone_ratio < 0.5) {
            problems.push(format!(
                "drop_zone_ratio must be in (0, 0.5), got {}",
                self.drop_zone_ratio
            ));
        }
        if !self.edge_rail_thickness.is_finite() || self.edge_rail_thickness < 0.0 {
            problems.push(format!(
                "edge_rail_thickness must be >= 0, got {}",
                self.edge_rail_thickness
            ));
        }
        if !(self.edge_panel_share > 0.0 && self.edge_panel_share < 1.0) {
            problems.push(format!(
                "edge_panel_share must be in (0, 1), got {}",
                self.edge_panel_share
            ));
        }
        problems
    }
}

/// Returns the configuration directory.
///
/// `PANELDECK_CONFIG_DIR` wins when set; otherwise the platform config
/// directory joined with `paneldeck`. Falls back to `.paneldeck` in the
/// working directory when the platform has no config directory.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(|| PathBuf::from(".paneldeck"), |dir| dir.join("paneldeck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        assert!(LayoutSettings::default().validate().is_empty());
    }

    #[test]
    fn partial_override_preserves_defaults() {
        let settings = LayoutSettings::from_toml("drop_zone_ratio = 0.3\n").unwrap();
        assert!((settings.drop_zone_ratio - 0.3).abs() < f64::EPSILON);
        assert_eq!(settings.touch_activation_delay_ms, 250);
        assert!((settings.pointer_activation_distance - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_catches_out_of_range_values() {
        let settings = LayoutSettings {
            drop_zone_ratio: 0.7,
            edge_panel_share: 1.0,
            touch_tolerance: -1.0,
            ..LayoutSettings::default()
        };
        assert_eq!(settings.validate().len(), 3);
    }

    #[test]
    fn from_toml_rejects_invalid_values() {
        let result = LayoutSettings::from_toml("edge_panel_share = 0.0\n");
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn from_toml_rejects_malformed_input() {
        let result = LayoutSettings::from_toml("drop_zone_ratio = \"wide\"\n");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);
        let settings = LayoutSettings {
            edge_rail_thickness: 24.0,
            ..LayoutSettings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(LayoutSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LayoutSettings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings, LayoutSettings::default());
    }
}
