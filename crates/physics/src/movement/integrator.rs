//! Viewpoint movement integrator.
//!
//! This is the main entry point for viewpoint movement. It takes the held keys
//! and the frame's elapsed time and advances velocity and position.

use glam::Vec3;

use super::config::MovementConfig;
use super::floor::FloorConstraint;
use super::state::{InputState, MovementState};

/// What happened during one integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Time step actually integrated (after clamping).
    pub delta: f32,

    /// The floor constraint corrected the position this step.
    pub landed: bool,
}

/// Viewpoint movement integrator.
///
/// Handles:
/// - Horizontal damping
/// - Gravity
/// - Acceleration from held direction keys
/// - Jump impulses (edge-triggered, outside the per-frame step)
/// - Mouse look
/// - The floor constraint
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use roboview_physics::{InputState, MovementConfig, MovementIntegrator, MovementState};
///
/// let integrator = MovementIntegrator::new(MovementConfig::default());
/// let mut state = MovementState::new(Vec3::new(0.0, 10.0, 0.0));
/// let mut input = InputState::new();
///
/// input.movement.forward = true;
/// integrator.step(&mut state, &mut input, 1.0 / 60.0);
/// assert!(state.position.x > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MovementIntegrator {
    /// Movement configuration.
    pub config: MovementConfig,
}

impl MovementIntegrator {
    /// Create a new integrator with the given configuration.
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Create an integrator with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(MovementConfig::default())
    }

    /// The floor plane this integrator enforces.
    pub fn floor(&self) -> FloorConstraint {
        FloorConstraint::new(self.config.floor_height)
    }

    /// Advance the viewpoint by one frame.
    ///
    /// # Arguments
    ///
    /// * `state` - The viewpoint's movement state (will be modified)
    /// * `input` - Held keys; `can_jump` is set when the floor is hit
    /// * `elapsed` - Time since the previous step in seconds
    pub fn step(&self, state: &mut MovementState, input: &mut InputState, elapsed: f32) -> StepReport {
        // Negative or non-finite deltas are a caller bug; treat them as a paused clock
        let dt = if elapsed.is_finite() {
            elapsed.clamp(0.0, self.config.max_step)
        } else {
            0.0
        };
        if dt == 0.0 {
            return StepReport::default();
        }

        self.apply_damping(state, dt);
        self.apply_gravity(state, dt);
        self.accelerate(state, input, dt);
        self.translate(state, dt);

        let landed = self.floor().apply(state, input);
        if landed {
            log::trace!("landed at {:?}", state.position);
        }

        StepReport { delta: dt, landed }
    }

    /// Apply a jump impulse if jumping is armed.
    ///
    /// Called on the jump key's down edge, not from [`step`](Self::step).
    /// `can_jump` is cleared either way, so holding or mashing the key while
    /// airborne does nothing until the next landing.
    pub fn jump(&self, state: &mut MovementState, input: &mut InputState) -> bool {
        let jumped = input.can_jump;
        if jumped {
            state.velocity.y += self.config.jump_impulse;
        }
        input.can_jump = false;
        jumped
    }

    /// Rotate the view by a mouse delta.
    ///
    /// `dx` turns (yaw), `dy` tilts (pitch, positive looks down).
    pub fn look(&self, state: &mut MovementState, dx: f32, dy: f32, sensitivity: f32) {
        state.view_angles.x += dy * sensitivity;
        state.view_angles.y += dx * sensitivity;

        let limit = self.config.pitch_limit;
        state.view_angles.x = state.view_angles.x.clamp(-limit, limit);

        // Normalize yaw to -PI..PI
        while state.view_angles.y > std::f32::consts::PI {
            state.view_angles.y -= std::f32::consts::TAU;
        }
        while state.view_angles.y < -std::f32::consts::PI {
            state.view_angles.y += std::f32::consts::TAU;
        }
    }

    // ========================================================================
    // Integration stages
    // ========================================================================

    fn apply_damping(&self, state: &mut MovementState, dt: f32) {
        let factor = self.config.damping * dt;
        state.velocity.x -= state.velocity.x * factor;
        state.velocity.z -= state.velocity.z * factor;
    }

    fn apply_gravity(&self, state: &mut MovementState, dt: f32) {
        state.velocity.y -= self.config.weight() * dt;
    }

    fn accelerate(&self, state: &mut MovementState, input: &InputState, dt: f32) {
        let movement = input.movement;
        let direction = movement.direction();
        let push = self.config.acceleration * dt;

        if movement.longitudinal() {
            state.velocity.z -= direction.z * push;
        }
        if movement.lateral() {
            state.velocity.x -= direction.x * push;
        }
    }

    fn translate(&self, state: &mut MovementState, dt: f32) {
        let right = state.right_direction();
        let forward = state.forward_direction();

        state.position += right * (-state.velocity.x * dt) + forward * (-state.velocity.z * dt);
        state.position += Vec3::Y * (state.velocity.y * dt);
    }
}

impl Default for MovementIntegrator {
    fn default() -> Self {
        Self::with_default_config()
    }
}
