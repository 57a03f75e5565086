//! Movement configuration constants.
//!
//! All movement parameters are grouped here for easy tuning. The defaults
//! give the demo its floaty feel, which is measured in scene units rather
//! than meters (the viewpoint floats ten units above the ground plane).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected movement configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MovementConfigError {
    #[error("movement constant `{name}` must be finite and non-negative, got {value}")]
    InvalidConstant { name: &'static str, value: f32 },

    #[error("damping {damping} * max_step {max_step} must stay below 1.0 or velocity flips sign")]
    UnstableDamping { damping: f32, max_step: f32 },
}

/// Configuration for viewpoint movement physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Physics
    // ========================================================================
    /// Horizontal damping rate (1/second).
    ///
    /// Each frame removes `velocity * damping * dt` from the x and z
    /// components. This is a linearized decay and is frame-rate coupled.
    pub damping: f32,

    /// Gravity acceleration (units/second²).
    pub gravity: f32,

    /// Mass multiplier applied to gravity.
    pub mass: f32,

    /// Acceleration added while a direction key is held (units/second²).
    pub acceleration: f32,

    /// Upward velocity added by a jump (units/second).
    pub jump_impulse: f32,

    // ========================================================================
    // Constraints
    // ========================================================================
    /// Height of the floor plane the viewpoint rests on.
    pub floor_height: f32,

    /// Longest time step a single integration may take (seconds).
    ///
    /// Longer frames (tab switches, debugger pauses) are truncated to this.
    pub max_step: f32,

    /// Pitch limit for mouse look (radians).
    pub pitch_limit: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            gravity: 9.8,
            mass: 100.0,
            acceleration: 400.0,
            jump_impulse: 350.0,

            floor_height: 10.0,
            max_step: 0.066, // ~15 FPS minimum
            pitch_limit: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}

impl MovementConfig {
    /// Low gravity, long hang time.
    pub fn floaty() -> Self {
        Self {
            gravity: 3.0,
            jump_impulse: 200.0,
            damping: 6.0,
            ..Default::default()
        }
    }

    /// Quick to start, quick to stop.
    pub fn snappy() -> Self {
        Self {
            damping: 14.0,
            acceleration: 700.0,
            max_step: 0.05,
            ..Default::default()
        }
    }

    /// Steady-state horizontal speed while a single axis key is held.
    ///
    /// Acceleration and damping balance when `v * damping == acceleration`.
    pub fn terminal_speed(&self) -> f32 {
        if self.damping > 0.0 {
            self.acceleration / self.damping
        } else {
            f32::INFINITY
        }
    }

    /// Effective downward acceleration (gravity times mass).
    #[inline]
    pub fn weight(&self) -> f32 {
        self.gravity * self.mass
    }

    /// Check that every constant is usable.
    pub fn validate(&self) -> Result<(), MovementConfigError> {
        let constants = [
            ("damping", self.damping),
            ("gravity", self.gravity),
            ("mass", self.mass),
            ("acceleration", self.acceleration),
            ("jump_impulse", self.jump_impulse),
            ("max_step", self.max_step),
            ("pitch_limit", self.pitch_limit),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(MovementConfigError::InvalidConstant { name, value });
            }
        }
        if !self.floor_height.is_finite() {
            return Err(MovementConfigError::InvalidConstant {
                name: "floor_height",
                value: self.floor_height,
            });
        }
        if self.damping * self.max_step >= 1.0 {
            return Err(MovementConfigError::UnstableDamping {
                damping: self.damping,
                max_step: self.max_step,
            });
        }
        Ok(())
    }
}
