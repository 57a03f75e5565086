//! Roboview frame driver.
//!
//! This crate ties the viewpoint physics and the character's crossfade
//! controller into one per-frame loop:
//!
//! - Keyboard and mouse events routed to movement flags and animation requests
//! - A single frame clock feeding both animation and physics
//! - Facial expression weights passed straight through to rendering
//! - JSON-loadable demo configuration
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         DemoContext                           │
//! │  ┌─────────┐  dispatch  ┌────────────┐       ┌────────────┐  │
//! │  │DemoEvent│───────────►│ InputState │──────►│ Movement   │  │
//! │  └─────────┘     │      └────────────┘       │ Integrator │  │
//! │                  │      ┌────────────┐       └────────────┘  │
//! │                  └─────►│ Crossfade  │             ▲         │
//! │                         │ Controller │◄── frame ───┤         │
//! │                         └────────────┘   FrameClock           │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod expression;
pub mod input;

pub use catalog::ClipCatalog;
pub use clock::FrameClock;
pub use config::DemoConfig;
pub use context::{DemoContext, FrameOutput};
pub use error::{ConfigError, GameError};
pub use expression::Expressions;
pub use input::{apply_key, DemoEvent, KeyAction, KeyCode, REST_STATE, WALK_STATE};

// Re-export the lower layers for convenience
pub use roboview_animation::{ActionWeight, AnimationConfig, AnimationError, EmotePhase, Roster};
pub use roboview_physics::{MovementConfig, MovementState};
