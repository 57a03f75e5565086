//! Error types for the frame driver.

use std::path::PathBuf;

use glam::Vec3;
use roboview_animation::AnimationError;
use roboview_physics::MovementConfigError;
use thiserror::Error;

/// A demo configuration that cannot be loaded or used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Movement(#[from] MovementConfigError),

    #[error("fade durations must be finite and non-negative: {}", .0.join(", "))]
    InvalidFades(Vec<&'static str>),

    #[error("default state '{0}' is not a steady state in the roster")]
    DefaultStateNotSteady(String),

    #[error("roster must list '{0}' as a steady state for the forward key")]
    MissingKeyState(&'static str),

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: Vec3 },

    #[error("{name} must be positive and finite, got {value}")]
    InvalidValue { name: &'static str, value: f32 },
}

/// Anything a demo event or setup step can fail with.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown expression: {0}")]
    UnknownExpression(String),

    #[error("unknown key code: {0}")]
    UnknownKey(String),
}

impl GameError {
    /// True for errors a running demo can shrug off (a bad request, not a
    /// broken setup).
    pub fn is_recoverable(&self) -> bool {
        match self {
            GameError::Animation(err) => !err.is_configuration(),
            GameError::Config(_) => false,
            GameError::UnknownExpression(_) | GameError::UnknownKey(_) => true,
        }
    }
}
