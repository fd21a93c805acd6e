// SPDX-License-Identifier: MPL-2.0
//! This module handles the gesture configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use drag_dismiss::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Make dismissal less sensitive
//! config.dismiss_threshold = Some(0.5);
//!
//! config::save(&config).expect("Failed to save config");
//!
//! let settings = config.gesture_settings();
//! assert_eq!(settings.threshold.value(), 0.5);
//! ```

pub mod defaults;

use crate::domain::gesture::{DismissThreshold, SettleDuration, TouchSlop};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "DragDismiss";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dismiss_threshold: Option<f32>,
    #[serde(default)]
    pub touch_slop: Option<f32>,
    #[serde(default)]
    pub settle_base_ms: Option<u64>,
    #[serde(default)]
    pub settle_max_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dismiss_threshold: Some(defaults::DEFAULT_DISMISS_THRESHOLD),
            touch_slop: Some(defaults::DEFAULT_TOUCH_SLOP),
            settle_base_ms: Some(defaults::BASE_SETTLE_DURATION_MS),
            settle_max_ms: Some(defaults::MAX_SETTLE_DURATION_MS),
        }
    }
}

/// Validated gesture tunables derived from a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSettings {
    pub threshold: DismissThreshold,
    pub touch_slop: TouchSlop,
    pub settle: SettleDuration,
}

impl Config {
    /// Converts the raw settings into validated gesture tunables.
    ///
    /// Missing or out-of-range values fall back to (or are clamped into) the
    /// defaults in [`defaults`].
    #[must_use]
    pub fn gesture_settings(&self) -> GestureSettings {
        GestureSettings {
            threshold: self
                .dismiss_threshold
                .map(DismissThreshold::new)
                .unwrap_or_default(),
            touch_slop: self.touch_slop.map(TouchSlop::new).unwrap_or_default(),
            settle: SettleDuration::new(
                self.settle_base_ms
                    .unwrap_or(defaults::BASE_SETTLE_DURATION_MS),
                self.settle_max_ms
                    .unwrap_or(defaults::MAX_SETTLE_DURATION_MS),
            ),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring invalid settings at {}: {err}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
