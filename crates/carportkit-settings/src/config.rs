//! Application settings for carportkit
//!
//! Provides settings file handling and validation. Supports JSON and TOML
//! file formats stored in the platform configuration directory.
//!
//! Settings are organized into logical sections:
//! - Interaction tunables (grid, post spacing, feature margin, click timing)
//! - Share link settings (base URL, query parameter)
//! - Storage settings (persistence key and directory)

use carportkit_layout::{DragSettings, PlacementSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Directory name under the platform configuration directory.
pub const APP_DIR: &str = "carportkit";

/// Settings file name inside [`APP_DIR`].
pub const SETTINGS_FILE: &str = "settings.toml";

/// Pointer interaction tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Snapping grid in meters
    pub grid_size: f64,
    /// Minimum distance between the two posts of a new panel
    pub min_post_spacing: f64,
    /// Distance kept between a window or door and the ends of its panel
    pub feature_margin: f64,
    /// Clicks this soon after a drag are ignored
    pub click_suppress_ms: u64,
    /// Longest pointer-down to double-click interval that removes an element
    pub double_click_ms: u64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            grid_size: 0.5,
            min_post_spacing: 0.2,
            feature_margin: 0.5,
            click_suppress_ms: 100,
            double_click_ms: 200,
        }
    }
}

impl From<&InteractionSettings> for PlacementSettings {
    fn from(settings: &InteractionSettings) -> Self {
        PlacementSettings {
            grid_size: settings.grid_size,
            min_post_spacing: settings.min_post_spacing,
            feature_margin: settings.feature_margin,
        }
    }
}

impl From<&InteractionSettings> for DragSettings {
    fn from(settings: &InteractionSettings) -> Self {
        DragSettings {
            placement: settings.into(),
            click_suppression: Duration::from_millis(settings.click_suppress_ms),
            double_click_window: Duration::from_millis(settings.double_click_ms),
        }
    }
}

/// Share link settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Page the share link points at
    pub base_url: String,
    /// Query parameter carrying the configuration
    pub param_name: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            param_name: carportkit_layout::sharing::DEFAULT_PARAM.to_string(),
        }
    }
}

/// Local storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Namespaced key the configuration is stored under
    pub namespace_key: String,
    /// Overrides the platform configuration directory
    pub directory: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            namespace_key: "carport-config".to_string(),
            directory: None,
        }
    }
}

impl StorageSettings {
    /// Directory holding the persisted configuration.
    pub fn resolve_directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => app_dir(),
        }
    }
}

/// `<platform config dir>/carportkit`, or `./carportkit` when the platform
/// has none.
pub fn app_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Complete application settings
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Pointer interaction tunables
    pub interaction: InteractionSettings,
    /// Share link settings
    pub share: ShareSettings,
    /// Local storage settings
    pub storage: StorageSettings,
}

impl Config {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the settings file.
    pub fn default_path() -> PathBuf {
        app_dir().join(SETTINGS_FILE)
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        config.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load settings from file, falling back to defaults when the file does
    /// not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> ConfigResult<()> {
        let interaction = &self.interaction;
        positive("interaction.grid_size", interaction.grid_size)?;
        positive("interaction.feature_margin", interaction.feature_margin)?;
        if interaction.min_post_spacing.is_nan() || interaction.min_post_spacing < 0.0 {
            return Err(out_of_range(
                "interaction.min_post_spacing",
                interaction.min_post_spacing,
            ));
        }
        if interaction.double_click_ms == 0 {
            return Err(out_of_range("interaction.double_click_ms", 0));
        }

        if self.share.param_name.trim().is_empty() {
            return Err(ConfigError::MissingKey("share.param_name".to_string()));
        }
        if self.share.base_url.trim().is_empty() {
            return Err(ConfigError::MissingKey("share.base_url".to_string()));
        }
        if self.storage.namespace_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("storage.namespace_key".to_string()));
        }

        Ok(())
    }

    pub fn placement_settings(&self) -> PlacementSettings {
        (&self.interaction).into()
    }

    pub fn drag_settings(&self) -> DragSettings {
        (&self.interaction).into()
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(key, value))
    }
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}
