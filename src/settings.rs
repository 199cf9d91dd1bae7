//! Game settings and preferences
//!
//! Loaded from a JSON file. Missing keys fall back to the defaults, so a
//! minimal file can override only what it cares about.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, MAX_PARTICLES};
use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Simulation ===
    /// RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,
    /// Ticks to simulate in headless runs
    pub headless_ticks: u64,

    // === Audio ===
    pub sound_enabled: bool,

    // === Visual Effects ===
    /// Particle effects (explosions, sparks)
    pub particles: bool,
    /// Particle pool cap
    pub max_particles: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            seed: None,
            headless_ticks: 60 * 60,
            sound_enabled: true,
            particles: true,
            max_particles: MAX_PARTICLES,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            return Err(SettingsError::Invalid {
                field: "arena_width",
                reason: "must be a positive number",
            });
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            return Err(SettingsError::Invalid {
                field: "arena_height",
                reason: "must be a positive number",
            });
        }
        Ok(())
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles { 0 } else { self.max_particles }
    }
}
