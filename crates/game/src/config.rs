//! Demo configuration.
//!
//! Groups the movement and animation tunables with the few settings that only
//! the frame driver uses. Every field falls back to its default when missing
//! from a config file, so a partial JSON document is a valid config.

use std::fs;
use std::path::Path;

use glam::Vec3;
use roboview_animation::{ActionKind, AnimationConfig, Roster};
use roboview_physics::MovementConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::{REST_STATE, WALK_STATE};

/// Complete configuration for one demo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub movement: MovementConfig,
    pub animation: AnimationConfig,

    /// Steady states and emotes the character must provide.
    pub roster: Roster,

    /// Radians of view rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,

    /// Where the viewpoint starts.
    pub spawn_position: Vec3,

    /// Point the viewpoint initially faces.
    pub look_target: Vec3,

    /// Frames per second for the headless driver.
    pub tick_rate: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            animation: AnimationConfig::default(),
            roster: Roster::robot_expressive(),
            mouse_sensitivity: 0.002,
            spawn_position: Vec3::new(-5.0, 3.0, 10.0),
            look_target: Vec3::new(0.0, 2.0, 0.0),
            tick_rate: 60,
        }
    }
}

impl DemoConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Fixed time step of the headless driver (seconds).
    pub fn frame_time(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }

    /// Reject values the driver cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;

        let invalid = self.animation.invalid_fades();
        if !invalid.is_empty() {
            return Err(ConfigError::InvalidFades(invalid));
        }

        let default_state = &self.animation.default_state;
        if self.roster.classify(default_state).0 != ActionKind::SteadyState {
            return Err(ConfigError::DefaultStateNotSteady(default_state.clone()));
        }
        for state in [WALK_STATE, REST_STATE] {
            if self.roster.classify(state).0 != ActionKind::SteadyState {
                return Err(ConfigError::MissingKeyState(state));
            }
        }

        if !self.mouse_sensitivity.is_finite() || self.mouse_sensitivity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "mouse_sensitivity",
                value: self.mouse_sensitivity,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidValue {
                name: "tick_rate",
                value: 0.0,
            });
        }
        for (name, value) in [("spawn_position", self.spawn_position), ("look_target", self.look_target)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        Ok(())
    }
}
