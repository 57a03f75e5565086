//! Ground plane constraint.

use serde::{Deserialize, Serialize};

use super::state::{InputState, MovementState};

/// A flat floor at a fixed height.
///
/// This is the only contact surface the viewpoint knows about: there is no
/// terrain or object collision, so landing on the floor is what re-arms
/// jumping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorConstraint {
    /// Minimum height of the viewpoint.
    pub height: f32,
}

impl FloorConstraint {
    pub fn new(height: f32) -> Self {
        Self { height }
    }

    /// Clamp the viewpoint onto the floor if it sank below it.
    ///
    /// Returns `true` when a correction was made, in which case vertical
    /// velocity is zeroed and `can_jump` is set.
    pub fn apply(&self, state: &mut MovementState, input: &mut InputState) -> bool {
        if state.position.y >= self.height {
            return false;
        }
        state.position.y = self.height;
        state.velocity.y = 0.0;
        input.can_jump = true;
        true
    }

    /// Check if the viewpoint is resting on (or within `epsilon` of) the floor.
    pub fn is_grounded(&self, state: &MovementState, epsilon: f32) -> bool {
        state.position.y - self.height <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_clamps_below_floor() {
        let floor = FloorConstraint::new(10.0);
        let mut state = MovementState::new(Vec3::new(1.0, 3.0, 2.0));
        state.velocity = Vec3::new(4.0, -50.0, 6.0);
        let mut input = InputState::new();

        assert!(floor.apply(&mut state, &mut input));
        assert_eq!(state.position, Vec3::new(1.0, 10.0, 2.0));
        assert_eq!(state.velocity, Vec3::new(4.0, 0.0, 6.0));
        assert!(input.can_jump);
    }

    #[test]
    fn test_leaves_airborne_state_alone() {
        let floor = FloorConstraint::new(10.0);
        let mut state = MovementState::new(Vec3::new(0.0, 12.0, 0.0));
        state.velocity.y = 20.0;
        let mut input = InputState::new();

        assert!(!floor.apply(&mut state, &mut input));
        assert_eq!(state.position.y, 12.0);
        assert_eq!(state.velocity.y, 20.0);
        assert!(!input.can_jump);
    }

    #[test]
    fn test_exactly_on_floor_is_not_corrected() {
        let floor = FloorConstraint::new(10.0);
        let mut state = MovementState::new(Vec3::new(0.0, 10.0, 0.0));
        let mut input = InputState::new();

        assert!(!floor.apply(&mut state, &mut input));
        assert!(floor.is_grounded(&state, 0.001));
    }
}
