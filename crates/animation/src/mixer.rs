//! Action mixer.
//!
//! Owns every [`Action`] of a character and advances them together. Instead
//! of listener callbacks the mixer returns the events an update produced, so
//! the caller decides what a finished clip means.

use crate::action::{Action, ActionEvent};

/// Handle to an action inside a [`Mixer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(usize);

impl ActionId {
    /// Position of the action in the mixer.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Event produced by [`Mixer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerEvent {
    /// A clamped action reached its final frame.
    Finished(ActionId),
}

/// Collection of actions advanced in lockstep.
#[derive(Debug, Clone, Default)]
pub struct Mixer {
    actions: Vec<Action>,
    /// Total time advanced (seconds).
    time: f64,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action and return its handle.
    pub fn add(&mut self, action: Action) -> ActionId {
        self.actions.push(action);
        ActionId(self.actions.len() - 1)
    }

    /// Get an action by handle.
    ///
    /// Handles are only minted by [`add`](Self::add), so lookups by a handle
    /// from this mixer always succeed.
    pub fn action(&self, id: ActionId) -> &Action {
        &self.actions[id.0]
    }

    pub fn action_mut(&mut self, id: ActionId) -> &mut Action {
        &mut self.actions[id.0]
    }

    /// Find an action by clip name.
    pub fn find(&self, name: &str) -> Option<ActionId> {
        self.actions
            .iter()
            .position(|a| a.name() == name)
            .map(ActionId)
    }

    /// Iterate all actions with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions.iter().enumerate().map(|(i, a)| (ActionId(i), a))
    }

    /// Advance every action by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) -> Vec<MixerEvent> {
        self.time += f64::from(delta_time);

        self.actions
            .iter_mut()
            .enumerate()
            .filter_map(|(i, action)| match action.update(delta_time) {
                Some(ActionEvent::Finished) => Some(MixerEvent::Finished(ActionId(i))),
                None => None,
            })
            .collect()
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of actions currently advancing.
    pub fn running_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_running()).count()
    }

    /// Number of actions contributing a nonzero weight.
    pub fn weighted_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.effective_weight() > 0.0)
            .count()
    }

    /// Total time advanced since creation (seconds).
    pub fn time(&self) -> f64 {
        self.time
    }
}
