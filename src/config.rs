//! Configuration file support.
//!
//! User preferences are stored as pretty-printed JSON in the platform config
//! directory on native targets and in `localStorage` on the web.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::SortMode;
use crate::constants::{DEFAULT_SAMPLE_COUNT, DEFAULT_TINT_SHADE_STEPS};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

fn default_app_name() -> String {
    "pfs-palettes".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// How palette colors are ordered for display
    #[serde(default)]
    pub sort_mode: SortMode,

    /// Number of swatches in a tint/shade scale
    #[serde(default = "default_tint_shade_steps")]
    pub tint_shade_steps: usize,

    /// Target size when sampling a palette
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_tint_shade_steps() -> usize {
    DEFAULT_TINT_SHADE_STEPS
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            sort_mode: SortMode::default(),
            tint_shade_steps: default_tint_shade_steps(),
            sample_count: default_sample_count(),
            log_level: LogLevel::default(),
        }
    }
}

impl UserPreferences {
    /// Scale length to use; a scale needs at least both endpoints.
    pub fn tint_shade_steps(&self) -> usize {
        self.tint_shade_steps.max(2)
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default config file name.
    pub fn default_filename() -> &'static str {
        "pfs-palettes-config.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        let base = dirs::config_dir().or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(base.join("pfs-palettes").join(Self::default_filename()))
    }

    /// Read configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load configuration from the default path, falling back to defaults
    /// when the file is missing or unreadable.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "pfsPalettes.config";

    /// Load configuration from localStorage, falling back to defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load_or_default() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(Self::LOCALSTORAGE_KEY).ok().flatten());

        match stored.as_deref().map(Self::from_json) {
            Some(Ok(config)) => {
                log::info!("Loaded configuration from localStorage");
                config
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored configuration: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Save configuration to localStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let storage = web_sys::window()
            .ok_or_else(|| ConfigError::Storage("No window object available".to_string()))?
            .local_storage()
            .map_err(|e| ConfigError::Storage(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::Storage("localStorage not available".to_string()))?;

        storage
            .set_item(Self::LOCALSTORAGE_KEY, &self.to_json()?)
            .map_err(|e| ConfigError::Storage(format!("Failed to save to localStorage: {:?}", e)))?;

        log::info!("Saved configuration to localStorage");
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = AppConfig::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(config, AppConfig::new());
        assert_eq!(config.preferences.tint_shade_steps, 9);
        assert_eq!(config.preferences.sample_count, 5);
        assert_eq!(config.preferences.sort_mode, SortMode::Brightness);
    }

    #[test]
    fn test_partial_preferences() {
        let json = r#"{"version": 1, "preferences": {"sort_mode": "hue", "log_level": "debug"}}"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.preferences.sort_mode, SortMode::Hue);
        assert_eq!(
            config.preferences.log_level.to_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(config.preferences.sample_count, 5);
    }

    #[test]
    fn test_rejects_newer_version() {
        let result = AppConfig::from_json(r#"{"version": 99}"#);
        assert!(matches!(
            result,
            Err(ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            AppConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_scale_steps_have_a_floor() {
        let mut prefs = UserPreferences::default();
        prefs.tint_shade_steps = 0;
        assert_eq!(prefs.tint_shade_steps(), 2);
        prefs.tint_shade_steps = 11;
        assert_eq!(prefs.tint_shade_steps(), 11);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("pfs-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join(AppConfig::default_filename());

        let mut config = AppConfig::new();
        config.preferences.sort_mode = SortMode::Hue;
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
        assert!(matches!(
            AppConfig::load_from(&dir.join("missing.json")),
            Err(ConfigError::Io(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
