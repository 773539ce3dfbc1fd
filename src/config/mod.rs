// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[search]` - Search backend address and query parameters
//! - `[carousel]` - Result carousel animation settings
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument or `SEARCH_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use search_lens::config;
//!
//! let (mut config, _warning) = config::load();
//! config.search.min_score = Some(0.25);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Search backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Base URL of the search backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Minimum similarity score a match needs to be returned.
    #[serde(default = "default_min_score", skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f32>,

    /// Number of images the backend embeds per batch.
    #[serde(default = "default_batch_size", skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,

    /// Folder searched last time, restored into the search form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_folder: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            min_score: default_min_score(),
            batch_size: default_batch_size(),
            last_folder: None,
        }
    }
}

impl SearchConfig {
    /// Backend URL without a trailing slash.
    #[must_use]
    pub fn server_url(&self) -> String {
        self.server_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Minimum score clamped into the accepted range.
    #[must_use]
    pub fn min_score(&self) -> f32 {
        let value = self.min_score.unwrap_or(DEFAULT_MIN_SCORE);
        if value.is_finite() {
            value.clamp(MIN_MIN_SCORE, MAX_MIN_SCORE)
        } else {
            DEFAULT_MIN_SCORE
        }
    }

    /// Batch size clamped into the accepted range.
    #[must_use]
    pub fn batch_size(&self) -> u32 {
        self.batch_size
            .unwrap_or(DEFAULT_BATCH_SIZE)
            .clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE)
    }
}

/// Result carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarouselConfig {
    /// Duration of a slide animation, in milliseconds.
    #[serde(default = "default_transition_ms", skip_serializing_if = "Option::is_none")]
    pub transition_ms: Option<u32>,

    /// Fade-in duration of the active slide caption, in milliseconds.
    #[serde(
        default = "default_content_fade_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_fade_ms: Option<u32>,

    /// Drop rotation requests while a slide animation is still running
    /// instead of retargeting the animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialize_rotations: Option<bool>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            content_fade_ms: default_content_fade_ms(),
            serialize_rotations: Some(false),
        }
    }
}

impl CarouselConfig {
    #[must_use]
    pub fn transition(&self) -> Duration {
        let ms = self
            .transition_ms
            .unwrap_or(DEFAULT_TRANSITION_MS)
            .min(MAX_TRANSITION_MS);
        Duration::from_millis(u64::from(ms))
    }

    #[must_use]
    pub fn content_fade(&self) -> Duration {
        let ms = self
            .content_fade_ms
            .unwrap_or(DEFAULT_CONTENT_FADE_MS)
            .min(MAX_CONTENT_FADE_MS);
        Duration::from_millis(u64::from(ms))
    }

    #[must_use]
    pub fn serialize_rotations(&self) -> bool {
        self.serialize_rotations.unwrap_or(false)
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub carousel: CarouselConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_min_score() -> Option<f32> {
    Some(DEFAULT_MIN_SCORE)
}

fn default_batch_size() -> Option<u32> {
    Some(DEFAULT_BATCH_SIZE)
}

fn default_transition_ms() -> Option<u32> {
    Some(DEFAULT_TRANSITION_MS)
}

fn default_content_fade_ms() -> Option<u32> {
    Some(DEFAULT_CONTENT_FADE_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
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
                    log::warn!("falling back to default config: {err}");
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
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            search: SearchConfig {
                server_url: Some("http://search.local:9000".to_string()),
                min_score: Some(0.4),
                batch_size: Some(64),
                last_folder: Some("/photos".to_string()),
            },
            carousel: CarouselConfig {
                transition_ms: Some(400),
                content_fade_ms: Some(120),
                serialize_rotations: Some(true),
            },
        };
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
    fn load_with_override_warns_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[search\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[carousel]\ntransition_ms = 200\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded.carousel.transition(), Duration::from_millis(200));
        assert_eq!(loaded.search.batch_size(), DEFAULT_BATCH_SIZE);
        assert_eq!(loaded.general.theme_mode, ThemeMode::System);
    }

    #[test]
    fn search_accessors_clamp_out_of_range_values() {
        let search = SearchConfig {
            server_url: Some("http://example.com/".to_string()),
            min_score: Some(3.5),
            batch_size: Some(0),
            last_folder: None,
        };
        assert_eq!(search.server_url(), "http://example.com");
        assert_eq!(search.min_score(), MAX_MIN_SCORE);
        assert_eq!(search.batch_size(), MIN_BATCH_SIZE);

        let nan = SearchConfig {
            min_score: Some(f32::NAN),
            ..SearchConfig::default()
        };
        assert_eq!(nan.min_score(), DEFAULT_MIN_SCORE);
    }

    #[test]
    fn blank_server_url_falls_back_to_default() {
        let search = SearchConfig {
            server_url: Some("   ".to_string()),
            ..SearchConfig::default()
        };
        assert_eq!(search.server_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn carousel_durations_are_capped() {
        let carousel = CarouselConfig {
            transition_ms: Some(60_000),
            content_fade_ms: Some(60_000),
            serialize_rotations: None,
        };
        assert_eq!(
            carousel.transition(),
            Duration::from_millis(u64::from(MAX_TRANSITION_MS))
        );
        assert_eq!(
            carousel.content_fade(),
            Duration::from_millis(u64::from(MAX_CONTENT_FADE_MS))
        );
        assert!(!carousel.serialize_rotations());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}
