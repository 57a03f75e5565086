//! Keyboard input handling.
//!
//! This module maps key codes onto the viewpoint's [`InputState`] flags. The
//! forward key doubles as an animation trigger: its down edge selects Walking
//! and its up edge selects Idle. Backward and strafe keys only move.

use std::fmt;
use std::str::FromStr;

use roboview_physics::InputState;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Steady state selected while the forward key is held.
pub const WALK_STATE: &str = "Walking";

/// Steady state selected when the forward key is released.
pub const REST_STATE: &str = "Idle";

/// Keys the demo reacts to, named after DOM `KeyboardEvent.code` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    KeyW,
    ArrowLeft,
    KeyA,
    ArrowDown,
    KeyS,
    ArrowRight,
    KeyD,
    Space,
}

/// Movement direction bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl KeyCode {
    pub const ALL: [KeyCode; 9] = [
        KeyCode::ArrowUp,
        KeyCode::KeyW,
        KeyCode::ArrowLeft,
        KeyCode::KeyA,
        KeyCode::ArrowDown,
        KeyCode::KeyS,
        KeyCode::ArrowRight,
        KeyCode::KeyD,
        KeyCode::Space,
    ];

    /// The code string this key is known by.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyCode::ArrowUp => "ArrowUp",
            KeyCode::KeyW => "KeyW",
            KeyCode::ArrowLeft => "ArrowLeft",
            KeyCode::KeyA => "KeyA",
            KeyCode::ArrowDown => "ArrowDown",
            KeyCode::KeyS => "KeyS",
            KeyCode::ArrowRight => "ArrowRight",
            KeyCode::KeyD => "KeyD",
            KeyCode::Space => "Space",
        }
    }

    /// Movement direction for this key, if it is a direction key.
    pub fn direction(self) -> Option<Direction> {
        match self {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Direction::Forward),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Direction::Backward),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Direction::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Direction::Right),
            KeyCode::Space => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyCode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCode::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| GameError::UnknownKey(s.to_string()))
    }
}

/// Side effect of a key edge beyond the movement flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Select a steady state (forward key edges).
    SelectState(&'static str),
    /// Apply a jump impulse (space down).
    Jump,
}

/// Apply a key press or release to the input flags.
///
/// Returns the extra action the key triggers, if any. Forward only triggers
/// on a real edge, so auto-repeated key-down events do not restart Walking.
pub fn apply_key(input: &mut InputState, key: KeyCode, pressed: bool) -> Option<KeyAction> {
    let movement = &mut input.movement;

    match key.direction() {
        Some(Direction::Forward) => {
            let was_held = movement.forward;
            movement.forward = pressed;
            match (was_held, pressed) {
                (false, true) => Some(KeyAction::SelectState(WALK_STATE)),
                (true, false) => Some(KeyAction::SelectState(REST_STATE)),
                _ => None,
            }
        }
        Some(Direction::Backward) => {
            movement.backward = pressed;
            None
        }
        Some(Direction::Left) => {
            movement.left = pressed;
            None
        }
        Some(Direction::Right) => {
            movement.right = pressed;
            None
        }
        None if pressed => Some(KeyAction::Jump),
        None => None,
    }
}

/// Input event delivered to the demo context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DemoEvent {
    /// Key down (`pressed = true`) or up.
    Key { code: KeyCode, pressed: bool },
    /// Relative mouse motion in pixels.
    MouseMove { dx: f32, dy: f32 },
    /// The state selector changed.
    SelectState(String),
    /// An emote button was activated.
    TriggerEmote(String),
    /// An expression slider moved.
    SetExpression { name: String, value: f32 },
    /// Pointer captured: movement and mouse look are live.
    Lock,
    /// Pointer released.
    Unlock,
}

impl DemoEvent {
    pub fn key_down(code: KeyCode) -> Self {
        Self::Key { code, pressed: true }
    }

    pub fn key_up(code: KeyCode) -> Self {
        Self::Key { code, pressed: false }
    }
}
