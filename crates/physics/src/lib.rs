//! Roboview Physics
//!
//! Movement for a free-flying first-person viewpoint. The model is deliberately
//! simple: a fixed mass under fixed gravity, horizontal velocity damped every
//! frame, acceleration added only while a direction key is held, and a flat
//! floor plane that the viewpoint can never sink below.
//!
//! # Architecture
//!
//! - **State**: [`MovementState`] (position, velocity, view angles) and the
//!   [`InputState`] flags written by key events
//! - **Integrator**: [`MovementIntegrator`] advances the state by one frame
//! - **Floor**: [`FloorConstraint`] clamps the viewpoint back onto the ground
//!   plane and re-arms jumping
//!
//! There is no collision world. The floor plane is the only contact surface.

pub mod movement;

pub use movement::{
    FloorConstraint, InputState, MovementConfig, MovementConfigError, MovementInput,
    MovementIntegrator, MovementState, StepReport,
};
