//! Runner settings
//!
//! Preferences for the headless runner, kept separate from game balance.

use serde::{Deserialize, Serialize};

use crate::error::{Result, read_file};

/// Runner settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the run's RNG
    pub seed: u64,
    /// Simulated wall time to run before giving up (seconds)
    pub max_seconds: f32,
    /// Display frame rate driving the render tick
    pub frame_rate: f32,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Optional tuning sheet (JSON)
    pub tuning_path: Option<String>,
    /// Optional level descriptor (JSON)
    pub level_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5A15A,
            max_seconds: 180.0,
            frame_rate: 60.0,
            autopilot: true,
            tuning_path: None,
            level_path: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a file, or defaults when no path is given
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let settings = Self::from_json(&read_file(path)?)?;
                log::info!("Loaded settings from {}", path);
                Ok(settings)
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Milliseconds per displayed frame
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.frame_rate.max(1.0) as f64
    }
}
