//! Configuration management for calibration timing and storage paths
//!
//! This module provides runtime configuration loading from JSON files so the
//! prepare/capture delays and file locations can be adjusted without
//! recompilation. Every field has a default, and a missing or malformed file
//! falls back to the defaults. Waveform shape is fixed and not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub calibration: CalibrationConfig,
    pub storage: StorageConfig,
    pub assets: AssetConfig,
}

/// Calibration sequencer timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Delay between showing a prompt and starting the capture
    pub prepare_ms: u64,
    /// Duration of a capture before advancing to the next action
    pub capture_ms: u64,
}

impl CalibrationConfig {
    pub fn prepare_delay(&self) -> Duration {
        Duration::from_millis(self.prepare_ms)
    }

    pub fn capture_delay(&self) -> Duration {
        Duration::from_millis(self.capture_ms)
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            prepare_ms: 3_000,
            capture_ms: 5_000,
        }
    }
}

/// Credential storage location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("users.db"),
        }
    }
}

/// Prompt image location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub image_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("gui").join("calibration_images"),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file doesn't exist
    /// or the JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file("assets/eeg_config.json")
    }
}
