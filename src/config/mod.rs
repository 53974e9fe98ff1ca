// SPDX-License-Identifier: MPL-2.0
//! This module handles the toast manager configuration, including loading and
//! saving it to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[toasts]` - Defaults merged under every submission
//! - `[queue]` - Live collection capacity
//! - `[timing]` - Countdown tick period
//! - `[diagnostics]` - Event buffer size
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `TOAST_RACK_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_rack::config;
//! use toast_rack::domain::Capacity;
//!
//! let (mut config, _warning) = config::load();
//! config.queue.max_capacity = Capacity::new(3);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::{BufferCapacity, Capacity, TickInterval};
use crate::error::{Error, Result};
use crate::notifications::Position;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastRack";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOAST_RACK_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Defaults applied to every toast unless the caller overrides them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToastsConfig {
    /// Auto-dismiss duration in milliseconds (0 = persistent).
    pub duration_ms: u64,
    /// Duration used by the `error` convenience constructor.
    pub error_duration_ms: u64,
    pub position: Position,
    pub closable: bool,
    pub clickable: bool,
    pub show_progress: bool,
    pub pause_on_hover: bool,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            error_duration_ms: DEFAULT_ERROR_DURATION_MS,
            position: Position::default(),
            closable: DEFAULT_CLOSABLE,
            clickable: DEFAULT_CLICKABLE,
            show_progress: DEFAULT_SHOW_PROGRESS,
            pause_on_hover: DEFAULT_PAUSE_ON_HOVER,
        }
    }
}

/// Live collection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueueConfig {
    /// Oldest toasts are evicted once this many are live.
    pub max_capacity: Capacity,
}

/// Countdown settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_interval_ms: TickInterval,
}

/// Diagnostics settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub buffer_capacity: BufferCapacity,
}

/// Complete configuration, one field per TOML section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub toasts: ToastsConfig,
    pub queue: QueueConfig,
    pub timing: TimingConfig,
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    let dir = base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|path| path.join(APP_NAME)))?;
    Some(dir.join(CONFIG_FILE))
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default location.
///
/// Never fails: a missing file yields defaults, an unreadable one yields
/// defaults plus a warning key the caller may surface as a toast.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(Error::from)
}

/// Saves the configuration to the default location.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let mut config = Config::default();
        config.toasts.position = Position::BottomLeft;
        config.toasts.duration_ms = 1200;
        config.queue.max_capacity = Capacity::new(3);
        config.timing.tick_interval_ms = TickInterval::from_millis(100);

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[toasts]\nposition = \"bottom-center\"\n\n[queue]\nmax_capacity = 2\n",
        )
        .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(loaded.toasts.position, Position::BottomCenter);
        assert_eq!(loaded.toasts.duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(loaded.queue.max_capacity.value(), 2);
        assert_eq!(loaded.timing.tick_interval_ms.as_millis(), DEFAULT_TICK_INTERVAL_MS);
    }

    #[test]
    fn load_with_override_reports_warning_for_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[queue\n").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_writes_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        save_with_override(&Config::default(), Some(temp_dir.path().to_path_buf()))
            .expect("save should succeed");
        assert!(temp_dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = Config::default();
        assert_eq!(config.toasts.duration_ms, 5000);
        assert_eq!(config.toasts.error_duration_ms, 8000);
        assert_eq!(config.toasts.position, Position::TopRight);
        assert!(config.toasts.closable);
        assert!(!config.toasts.clickable);
        assert!(config.toasts.show_progress);
        assert!(config.toasts.pause_on_hover);
        assert_eq!(config.queue.max_capacity.value(), 5);
    }
}
