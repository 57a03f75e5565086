//! Named action table.
//!
//! Built once when the character's clip set becomes available. Every entry
//! carries its classification, so nothing downstream re-derives it from the
//! name lists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::action::{Action, PlayMode};
use crate::error::AnimationError;
use crate::mixer::{ActionId, Mixer};

/// Metadata for one clip, as provided by the asset layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub name: String,
    /// Clip length in seconds.
    pub duration: f32,
}

impl ClipInfo {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Role an action plays in the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Selectable ongoing behavior (Idle, Walking, ...).
    SteadyState,
    /// One-shot gesture that returns to the steady state when done.
    Emote,
    /// A clip the roster does not name.
    Extra,
}

/// The names the controller expects and how to classify them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Steady states, in selector order.
    pub states: Vec<String>,
    /// Emotes, in button order.
    pub emotes: Vec<String>,
    /// How many leading entries of `states` loop. The rest play once and clamp.
    pub looping_states: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self::robot_expressive()
    }
}

impl Roster {
    /// The RobotExpressive character's states and emotes.
    pub fn robot_expressive() -> Self {
        let states = ["Idle", "Walking", "Running", "Dance", "Death", "Sitting", "Standing"];
        let emotes = ["Jump", "Yes", "No", "Wave", "Punch", "ThumbsUp"];
        Self {
            states: states.iter().map(|s| s.to_string()).collect(),
            emotes: emotes.iter().map(|s| s.to_string()).collect(),
            looping_states: 4,
        }
    }

    /// Classify a clip name.
    ///
    /// Emotes and steady states past `looping_states` are one-shot clamped.
    /// Unlisted clips loop.
    pub fn classify(&self, name: &str) -> (ActionKind, PlayMode) {
        if self.emotes.iter().any(|e| e == name) {
            return (ActionKind::Emote, PlayMode::OnceClamped);
        }
        match self.states.iter().position(|s| s == name) {
            Some(index) if index < self.looping_states => (ActionKind::SteadyState, PlayMode::Loop),
            Some(_) => (ActionKind::SteadyState, PlayMode::OnceClamped),
            None => (ActionKind::Extra, PlayMode::Loop),
        }
    }

    /// Every name the roster requires, states first.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().chain(self.emotes.iter()).map(String::as_str)
    }
}

/// One table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub id: ActionId,
    pub kind: ActionKind,
    pub mode: PlayMode,
}

/// Action name → handle and classification.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    entries: HashMap<String, TableEntry>,
}

impl ActionTable {
    /// Register one action per clip in `mixer` and index them by name.
    ///
    /// Fails if a clip is duplicated, has an unusable duration, or if any
    /// roster name has no clip.
    pub fn build(mixer: &mut Mixer, clips: &[ClipInfo], roster: &Roster) -> Result<Self, AnimationError> {
        let mut entries = HashMap::with_capacity(clips.len());

        for clip in clips {
            if !clip.duration.is_finite() || clip.duration < 0.0 {
                return Err(AnimationError::InvalidClip {
                    name: clip.name.clone(),
                    duration: clip.duration,
                });
            }
            if entries.contains_key(&clip.name) {
                return Err(AnimationError::DuplicateClip(clip.name.clone()));
            }

            let (kind, mode) = roster.classify(&clip.name);
            let id = mixer.add(Action::new(clip.name.clone(), clip.duration, mode));
            entries.insert(clip.name.clone(), TableEntry { id, kind, mode });
        }

        let missing: Vec<String> = roster
            .required_names()
            .filter(|name| !entries.contains_key(*name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(AnimationError::MissingActions(missing));
        }

        log::info!(
            "action table built: {} clips ({} states, {} emotes)",
            entries.len(),
            roster.states.len(),
            roster.emotes.len()
        );

        Ok(Self { entries })
    }

    /// Look up an action by name.
    pub fn get(&self, name: &str) -> Result<&TableEntry, AnimationError> {
        self.entries
            .get(name)
            .ok_or_else(|| AnimationError::UnknownAction(name.to_string()))
    }

    /// Names of all entries of one kind, sorted.
    pub fn names(&self, kind: ActionKind) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.kind == kind)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
