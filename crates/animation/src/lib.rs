//! Roboview Animation
//!
//! Crossfade control for a humanoid character driven by named steady states
//! (Idle, Walking, ...) and one-shot emotes (Wave, Punch, ...).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    CrossfadeController                        │
//! │  select_state / trigger_emote ──► fade_to ──► Mixer actions   │
//! │                                                 │             │
//! │  tick(dt) ──► Mixer::update ──► Finished events ┘             │
//! │                   │                                           │
//! │                   └──► EmotePhase (restore to steady state)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`Mixer`] stands in for an animation-clip runtime: it owns one
//! [`Action`] per clip and advances local time, fade ramps, and clamping. It
//! knows nothing about skeletons. The render layer reads
//! [`CrossfadeController::weights`] each frame and applies them.

pub mod action;
pub mod config;
pub mod controller;
pub mod error;
pub mod mixer;
pub mod table;

pub use action::{Action, PlayMode};
pub use config::AnimationConfig;
pub use controller::{ActionWeight, CrossfadeController, EmotePhase};
pub use error::AnimationError;
pub use mixer::{ActionId, Mixer, MixerEvent};
pub use table::{ActionKind, ActionTable, ClipInfo, Roster, TableEntry};
