//! Movement state and input flags.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Direction key states.
///
/// Written by key-down/key-up events; read once per frame by the integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    /// Check if any direction key is held.
    #[inline]
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Check if forward or backward is held.
    #[inline]
    pub fn longitudinal(&self) -> bool {
        self.forward || self.backward
    }

    /// Check if left or right is held.
    #[inline]
    pub fn lateral(&self) -> bool {
        self.left || self.right
    }

    /// Local-space movement direction.
    ///
    /// `z` is forward minus backward, `x` is right minus left. The result is
    /// normalized when nonzero so a diagonal is no faster than a single axis.
    pub fn direction(&self) -> Vec3 {
        let z = f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward));
        let x = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        Vec3::new(x, 0.0, z).normalize_or_zero()
    }
}

/// Complete input state for the viewpoint.
///
/// `can_jump` is the one flag the physics side writes: a jump clears it and the
/// floor constraint sets it again on landing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Direction keys currently held.
    pub movement: MovementInput,

    /// Whether a jump impulse may be applied.
    pub can_jump: bool,
}

impl InputState {
    /// Input state with no keys held and jumping disarmed.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Movement state of the controlled viewpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    /// Eye position in world space.
    pub position: Vec3,

    /// Velocity (units/second).
    ///
    /// The horizontal components are stored in view space and are negated on
    /// application: a negative `z` moves forward, a negative `x` moves right.
    /// `y` is world-up.
    pub velocity: Vec3,

    /// View angles in radians: (pitch, yaw, roll).
    ///
    /// - Pitch: positive looks down
    /// - Yaw: 0 faces +X, increasing turns toward +Z
    /// - Roll: unused
    pub view_angles: Vec3,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            view_angles: Vec3::ZERO,
        }
    }
}

impl MovementState {
    /// Create a new movement state at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a state at `position` oriented toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut state = Self::new(position);
        let to_target = (target - position).normalize_or_zero();
        if to_target != Vec3::ZERO {
            state.view_angles.x = (-to_target.y).clamp(-1.0, 1.0).asin();
            state.view_angles.y = to_target.z.atan2(to_target.x);
        }
        state
    }

    /// Get the forward direction from view angles (horizontal only).
    pub fn forward_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.view_angles.y.sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw)
    }

    /// Get the right direction from view angles (horizontal only).
    pub fn right_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.view_angles.y.sin_cos();
        Vec3::new(-sin_yaw, 0.0, cos_yaw)
    }

    /// Get the full forward direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.view_angles.x.sin_cos();
        let (sin_yaw, cos_yaw) = self.view_angles.y.sin_cos();

        Vec3::new(cos_pitch * cos_yaw, -sin_pitch, cos_pitch * sin_yaw)
    }

    /// Get current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}
