//! Persistent settings for app initialization
//!
//! Saves and loads window size, title, tick rate, and the optional RNG seed
//! to/from an init_settings.json file in the config directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/init_settings.json";

/// Settings that survive between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitSettings {
    pub window_width: f64,
    pub window_height: f64,
    pub title: String,
    /// Simulation ticks per second
    pub tick_rate: f64,
    /// Fixed RNG seed for the initial ball velocity (None = entropy)
    pub seed: Option<u64>,
}

impl Default for InitSettings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            tick_rate: TICKS_PER_SECOND,
            seed: None,
        }
    }
}

impl InitSettings {
    /// Load settings from the default file, or return defaults if missing or invalid
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(Path::new(SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Tick duration in seconds (falls back to 60 Hz on a non-positive rate)
    pub fn tick_secs(&self) -> f64 {
        if self.tick_rate > 0.0 {
            1.0 / self.tick_rate
        } else {
            1.0 / TICKS_PER_SECOND
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("ballthrow_settings_{}", std::process::id()));
        let path = dir.join("init_settings.json");
        let settings = InitSettings {
            seed: Some(42),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(InitSettings::load_from(&path), settings);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = InitSettings::load_from(Path::new("config/nope/init_settings.json"));
        assert_eq!(settings, InitSettings::default());
    }

    #[test]
    fn test_tick_secs_guards_zero_rate() {
        let settings = InitSettings {
            tick_rate: 0.0,
            ..Default::default()
        };
        assert!((settings.tick_secs() - 1.0 / 60.0).abs() < 1e-12);
    }
}
