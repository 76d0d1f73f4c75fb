//! Tuning and preferences
//!
//! Stored as JSON. Missing keys fall back to the compile-time defaults in
//! [`crate::consts`], so a file can override just the values it cares about.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading, saving or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting {name} = {value}: {reason}")]
    Invalid {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Container ===
    pub container_width: f32,
    pub container_height: f32,
    /// Release height for tapped beads
    pub drop_height: f32,

    // === Physics ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Fixed simulation timestep (seconds)
    pub timestep: f32,
    pub density: f32,
    pub solver_iterations: u32,
    pub position_correction: f32,
    pub penetration_slop: f32,

    // === Scoring ===
    pub score_per_tier: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container_width: CONTAINER_WIDTH,
            container_height: CONTAINER_HEIGHT,
            drop_height: DROP_HEIGHT,

            gravity: GRAVITY,
            timestep: SIM_DT,
            density: DENSITY,
            solver_iterations: SOLVER_ITERATIONS,
            position_correction: POSITION_CORRECTION,
            penetration_slop: PENETRATION_SLOP,

            score_per_tier: SCORE_PER_TIER,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(name: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    name,
                    value: value as f64,
                    reason: "must be positive and finite",
                })
            }
        }
        fn unit(name: &'static str, value: f32) -> Result<(), SettingsError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    name,
                    value: value as f64,
                    reason: "must be within [0, 1]",
                })
            }
        }

        positive("container_width", self.container_width)?;
        positive("container_height", self.container_height)?;
        positive("timestep", self.timestep)?;
        positive("density", self.density)?;
        if !self.gravity.is_finite() {
            return Err(SettingsError::Invalid {
                name: "gravity",
                value: self.gravity as f64,
                reason: "must be finite",
            });
        }
        if !self.drop_height.is_finite() || self.drop_height >= self.container_height {
            return Err(SettingsError::Invalid {
                name: "drop_height",
                value: self.drop_height as f64,
                reason: "must be above the container floor",
            });
        }
        if self.solver_iterations == 0 {
            return Err(SettingsError::Invalid {
                name: "solver_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        unit("position_correction", self.position_correction)?;
        unit("master_volume", self.master_volume)?;
        unit("sfx_volume", self.sfx_volume)?;
        if !(self.penetration_slop.is_finite() && self.penetration_slop >= 0.0) {
            return Err(SettingsError::Invalid {
                name: "penetration_slop",
                value: self.penetration_slop as f64,
                reason: "must be non-negative",
            });
        }
        Ok(())
    }

    /// Effective sound effect gain (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
