//! Viewpoint movement physics.
//!
//! This module implements the per-frame movement integrator:
//!
//! - Frame-coupled horizontal damping (approximate friction)
//! - Gravity scaled by a fixed mass
//! - Input-driven acceleration that compounds while keys are held
//! - Edge-triggered jumping
//! - A floor plane constraint
//!
//! # Design
//!
//! The [`MovementIntegrator`] is stateless apart from its configuration. The
//! caller owns the [`MovementState`] and [`InputState`] and hands both in each
//! frame, so the integrator can be driven (and tested) without any renderer.

mod config;
mod floor;
mod integrator;
mod state;

pub use config::{MovementConfig, MovementConfigError};
pub use floor::FloorConstraint;
pub use integrator::{MovementIntegrator, StepReport};
pub use state::{InputState, MovementInput, MovementState};
