//! Steady-state / emote crossfade controller.
//!
//! The controller keeps a current and previous action and blends between them
//! whenever a new state is selected or an emote is triggered. Emotes return
//! to the recorded steady state on their own once the clip finishes.
//!
//! # Emote lifecycle
//!
//! ```text
//!             trigger_emote                fade window
//!   Steady ─────────────────► Transitioning ───────────► EmotePlaying
//!     ▲                          │  finished                 │ finished
//!     │   restore fade           ▼                           ▼
//!     └──────────────── RestoringToSteady ◄──────────────────┘
//! ```
//!
//! `select_state` from any phase returns to `Steady`. A finish event only
//! restores when it belongs to the emote the phase is waiting on, so an
//! interrupted emote that later reaches its end is ignored.

use crate::action::Action;
use crate::config::AnimationConfig;
use crate::error::AnimationError;
use crate::mixer::{ActionId, Mixer, MixerEvent};
use crate::table::{ActionKind, ActionTable, ClipInfo, Roster};

/// Restoration state of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmotePhase {
    /// A steady state is active; no restoration pending.
    Steady,
    /// Fading into an emote.
    TransitioningToEmote { emote: ActionId, remaining: f32 },
    /// The emote is fully faded in and playing.
    EmotePlaying { emote: ActionId },
    /// The emote finished; fading back to the steady state.
    RestoringToSteady { remaining: f32 },
}

impl EmotePhase {
    /// The emote whose finish would trigger restoration, if any.
    pub fn pending_emote(&self) -> Option<ActionId> {
        match *self {
            Self::TransitioningToEmote { emote, .. } | Self::EmotePlaying { emote } => Some(emote),
            Self::Steady | Self::RestoringToSteady { .. } => None,
        }
    }
}

/// Blend weight and local time of one action, for the render layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionWeight {
    pub name: String,
    pub weight: f32,
    pub time: f32,
}

/// Crossfade controller for one character.
#[derive(Debug, Clone)]
pub struct CrossfadeController {
    mixer: Mixer,
    table: ActionTable,
    config: AnimationConfig,

    current: ActionId,
    previous: Option<ActionId>,

    /// Steady state to return to after an emote.
    requested_state: String,
    phase: EmotePhase,

    /// Completed emote restorations.
    restorations: u32,
}

impl CrossfadeController {
    /// Build the action table and start the default state at full weight.
    pub fn new(clips: &[ClipInfo], roster: &Roster, config: AnimationConfig) -> Result<Self, AnimationError> {
        let mut mixer = Mixer::new();
        let table = ActionTable::build(&mut mixer, clips, roster)?;

        let entry = *table.get(&config.default_state)?;
        if entry.kind != ActionKind::SteadyState {
            return Err(AnimationError::NotASteadyState(config.default_state.clone()));
        }

        mixer
            .action_mut(entry.id)
            .reset()
            .set_effective_weight(1.0)
            .fade_in(0.0)
            .play();

        Ok(Self {
            mixer,
            table,
            requested_state: config.default_state.clone(),
            config,
            current: entry.id,
            previous: None,
            phase: EmotePhase::Steady,
            restorations: 0,
        })
    }

    /// Select a steady state and crossfade to it.
    ///
    /// Supersedes any emote in progress: its restoration will not happen.
    pub fn select_state(&mut self, name: &str, fade: f32) -> Result<(), AnimationError> {
        let entry = *self.table.get(name)?;
        if entry.kind != ActionKind::SteadyState {
            return Err(AnimationError::NotASteadyState(name.to_string()));
        }

        if let Some(emote) = self.phase.pending_emote() {
            log::debug!("state {name} interrupts emote {}", self.mixer.action(emote).name());
        }

        self.requested_state = name.to_string();
        self.fade_to(name, fade)?;
        self.phase = EmotePhase::Steady;
        Ok(())
    }

    /// Crossfade to an emote; return to the steady state when it finishes.
    pub fn trigger_emote(&mut self, name: &str, fade: f32) -> Result<(), AnimationError> {
        let entry = *self.table.get(name)?;
        if entry.kind != ActionKind::Emote {
            return Err(AnimationError::NotAnEmote(name.to_string()));
        }

        self.fade_to(name, fade)?;
        self.phase = if fade > 0.0 {
            EmotePhase::TransitioningToEmote {
                emote: entry.id,
                remaining: fade,
            }
        } else {
            EmotePhase::EmotePlaying { emote: entry.id }
        };
        Ok(())
    }

    /// Crossfade from the current action to `name` over `duration` seconds.
    ///
    /// The outgoing action fades out (unless it is the same action), the
    /// incoming one restarts from time zero at 1x speed and fades in. Fading
    /// away from a pending emote cancels its restoration.
    pub fn fade_to(&mut self, name: &str, duration: f32) -> Result<ActionId, AnimationError> {
        let next = self.table.get(name)?.id;
        if self.phase.pending_emote().is_some_and(|emote| emote != next) {
            self.phase = EmotePhase::Steady;
        }

        let previous = self.current;
        self.previous = Some(previous);
        self.current = next;

        if previous != next {
            self.mixer.action_mut(previous).fade_out(duration);
        }

        self.mixer
            .action_mut(next)
            .reset()
            .set_effective_time_scale(1.0)
            .set_effective_weight(1.0)
            .fade_in(duration)
            .play();

        log::debug!(
            "fade {} -> {} over {duration:.2}s",
            self.mixer.action(previous).name(),
            name
        );
        Ok(next)
    }

    /// Advance all actions by `elapsed` seconds and handle finished emotes.
    pub fn tick(&mut self, elapsed: f32) {
        let elapsed = elapsed.max(0.0);
        let events = self.mixer.update(elapsed);
        self.advance_phase(elapsed);

        for event in events {
            match event {
                MixerEvent::Finished(id) if self.phase.pending_emote() == Some(id) => self.restore(),
                MixerEvent::Finished(id) => {
                    log::debug!("ignoring finish of {}", self.mixer.action(id).name());
                }
            }
        }
    }

    fn advance_phase(&mut self, elapsed: f32) {
        self.phase = match self.phase {
            EmotePhase::TransitioningToEmote { emote, remaining } if remaining - elapsed <= 0.0 => {
                EmotePhase::EmotePlaying { emote }
            }
            EmotePhase::TransitioningToEmote { emote, remaining } => EmotePhase::TransitioningToEmote {
                emote,
                remaining: remaining - elapsed,
            },
            EmotePhase::RestoringToSteady { remaining } if remaining - elapsed <= 0.0 => EmotePhase::Steady,
            EmotePhase::RestoringToSteady { remaining } => EmotePhase::RestoringToSteady {
                remaining: remaining - elapsed,
            },
            phase => phase,
        };
    }

    fn restore(&mut self) {
        let state = self.requested_state.clone();
        let fade = self.config.restore_fade;

        match self.fade_to(&state, fade) {
            Ok(_) => {
                self.restorations += 1;
                self.phase = if fade > 0.0 {
                    EmotePhase::RestoringToSteady { remaining: fade }
                } else {
                    EmotePhase::Steady
                };
                log::debug!("emote finished, restoring {state}");
            }
            Err(e) => {
                log::error!("failed to restore steady state: {e}");
                self.phase = EmotePhase::Steady;
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn current(&self) -> ActionId {
        self.current
    }

    pub fn previous(&self) -> Option<ActionId> {
        self.previous
    }

    pub fn current_action_name(&self) -> &str {
        self.mixer.action(self.current).name()
    }

    pub fn previous_action_name(&self) -> Option<&str> {
        self.previous.map(|id| self.mixer.action(id).name())
    }

    /// The steady state an emote returns to.
    pub fn requested_state(&self) -> &str {
        &self.requested_state
    }

    pub fn phase(&self) -> EmotePhase {
        self.phase
    }

    /// Number of emotes that have restored the steady state.
    pub fn restorations(&self) -> u32 {
        self.restorations
    }

    /// Look up an action by name.
    pub fn action(&self, name: &str) -> Result<&Action, AnimationError> {
        let entry = self.table.get(name)?;
        Ok(self.mixer.action(entry.id))
    }

    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Actions with a nonzero blend weight, in registration order.
    pub fn weights(&self) -> Vec<ActionWeight> {
        self.mixer
            .iter()
            .filter(|(_, action)| action.effective_weight() > 0.0)
            .map(|(_, action)| ActionWeight {
                name: action.name().to_string(),
                weight: action.effective_weight(),
                time: action.time(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn clips() -> Vec<ClipInfo> {
        [
            ("Idle", 2.0),
            ("Walking", 1.0),
            ("Running", 0.7),
            ("Dance", 1.5),
            ("Death", 1.2),
            ("Sitting", 1.0),
            ("Standing", 1.0),
            ("Jump", 0.6),
            ("Yes", 1.1),
            ("No", 1.3),
            ("Wave", 1.0),
            ("Punch", 0.5),
            ("ThumbsUp", 1.0),
            ("WalkJump", 0.8),
        ]
        .iter()
        .map(|(name, duration)| ClipInfo::new(*name, *duration))
        .collect()
    }

    fn controller() -> CrossfadeController {
        CrossfadeController::new(&clips(), &Roster::default(), AnimationConfig::default()).unwrap()
    }

    fn run(controller: &mut CrossfadeController, seconds: f32) {
        let frames = (seconds / DT).ceil() as usize;
        for _ in 0..frames {
            controller.tick(DT);
        }
    }

    fn weight(controller: &CrossfadeController, name: &str) -> f32 {
        controller.action(name).unwrap().effective_weight()
    }

    #[test]
    fn test_starts_in_default_state() {
        let controller = controller();
        assert_eq!(controller.current_action_name(), "Idle");
        assert_eq!(controller.requested_state(), "Idle");
        assert_eq!(controller.phase(), EmotePhase::Steady);
        assert_eq!(weight(&controller, "Idle"), 1.0);
        assert_eq!(controller.weights().len(), 1);
    }

    #[test]
    fn test_missing_clip_fails_setup() {
        let mut set = clips();
        set.retain(|c| c.name != "Wave");
        let err = CrossfadeController::new(&set, &Roster::default(), AnimationConfig::default())
            .unwrap_err();
        assert_eq!(err, AnimationError::MissingActions(vec!["Wave".to_string()]));
    }

    #[test]
    fn test_default_state_must_be_steady() {
        let config = AnimationConfig {
            default_state: "Wave".to_string(),
            ..Default::default()
        };
        let err = CrossfadeController::new(&clips(), &Roster::default(), config).unwrap_err();
        assert_eq!(err, AnimationError::NotASteadyState("Wave".to_string()));
    }

    #[test]
    fn test_crossfade_exclusivity() {
        let mut controller = controller();
        controller.select_state("Running", 0.5).unwrap();

        let idle = controller.action("Idle").unwrap();
        let running = controller.action("Running").unwrap();
        assert!(idle.effective_weight() > 0.0);
        assert_eq!(idle.target_weight(), 0.0);
        assert_eq!(running.target_weight(), 1.0);
        assert!(running.is_running());

        let others = controller
            .mixer()
            .iter()
            .filter(|(_, a)| a.name() != "Idle" && a.name() != "Running")
            .filter(|(_, a)| a.target_weight() > 0.0 || a.effective_weight() > 0.0)
            .count();
        assert_eq!(others, 0);

        run(&mut controller, 0.55);
        assert_eq!(weight(&controller, "Idle"), 0.0);
        assert_eq!(weight(&controller, "Running"), 1.0);
        assert_eq!(controller.previous_action_name(), Some("Idle"));
    }

    #[test]
    fn test_weights_mid_crossfade_sum_to_one() {
        let mut controller = controller();
        controller.select_state("Walking", 0.5).unwrap();
        controller.tick(0.2);

        let total: f32 = controller.weights().iter().map(|w| w.weight).sum();
        assert!((total - 1.0).abs() < 1e-4, "total={total}");
        assert_eq!(controller.weights().len(), 2);
    }

    #[test]
    fn test_reselecting_current_state_restarts_without_fade_out() {
        let mut controller = controller();
        run(&mut controller, 0.75);
        assert!(controller.action("Idle").unwrap().time() > 0.5);

        controller.select_state("Idle", 0.5).unwrap();

        let idle = controller.action("Idle").unwrap();
        assert_eq!(idle.time(), 0.0);
        assert_eq!(idle.effective_weight(), 1.0);
        assert_eq!(idle.target_weight(), 1.0);
        assert_eq!(controller.current(), controller.previous().unwrap());
        assert_eq!(controller.mixer().weighted_count(), 1);
    }

    #[test]
    fn test_emote_restores_exactly_once() {
        let mut controller = controller();
        controller.trigger_emote("Wave", 0.2).unwrap();
        assert_eq!(controller.current_action_name(), "Wave");
        assert!(matches!(controller.phase(), EmotePhase::TransitioningToEmote { .. }));

        run(&mut controller, 0.5);
        assert!(matches!(controller.phase(), EmotePhase::EmotePlaying { .. }));

        // Wave is 1.0s long
        run(&mut controller, 0.6);
        assert_eq!(controller.current_action_name(), "Idle");
        assert_eq!(controller.restorations(), 1);

        run(&mut controller, 3.0);
        assert_eq!(controller.restorations(), 1);
        assert_eq!(controller.phase(), EmotePhase::Steady);
        assert_eq!(weight(&controller, "Idle"), 1.0);
        assert_eq!(weight(&controller, "Wave"), 0.0);
    }

    #[test]
    fn test_emote_restores_to_latest_selected_state() {
        let mut controller = controller();
        controller.select_state("Dance", 0.5).unwrap();
        run(&mut controller, 1.0);

        controller.trigger_emote("Punch", 0.2).unwrap();
        run(&mut controller, 1.0);

        assert_eq!(controller.current_action_name(), "Dance");
        assert_eq!(controller.restorations(), 1);
    }

    #[test]
    fn test_interrupted_emote_never_restores() {
        let mut controller = controller();
        controller.trigger_emote("Wave", 0.2).unwrap();
        run(&mut controller, 0.7);

        // Wave still has ~0.3s left and fades out over 0.5s, so its finish
        // fires while it is fading out
        controller.select_state("Running", 0.5).unwrap();
        run(&mut controller, 2.0);

        assert_eq!(controller.current_action_name(), "Running");
        assert_eq!(controller.requested_state(), "Running");
        assert_eq!(controller.restorations(), 0);
        assert_eq!(controller.phase(), EmotePhase::Steady);
    }

    #[test]
    fn test_second_emote_supersedes_first() {
        let mut controller = controller();
        controller.trigger_emote("Wave", 0.2).unwrap();
        run(&mut controller, 0.5);
        controller.trigger_emote("Yes", 0.6).unwrap();

        // Wave reaches its end while still fading out; only Yes may restore
        run(&mut controller, 0.8);
        assert_eq!(controller.restorations(), 0);
        assert_eq!(controller.current_action_name(), "Yes");

        run(&mut controller, 0.5);
        assert_eq!(controller.restorations(), 1);
        assert_eq!(controller.current_action_name(), "Idle");
    }

    #[test]
    fn test_retriggering_same_emote_restarts_it() {
        let mut controller = controller();
        controller.trigger_emote("Punch", 0.2).unwrap();
        run(&mut controller, 0.3);
        controller.trigger_emote("Punch", 0.2).unwrap();

        assert_eq!(controller.action("Punch").unwrap().time(), 0.0);
        run(&mut controller, 0.3);
        assert_eq!(controller.restorations(), 0);

        run(&mut controller, 0.3);
        assert_eq!(controller.restorations(), 1);
    }

    #[test]
    fn test_clamped_steady_state_does_not_restore() {
        let mut controller = controller();
        controller.select_state("Death", 0.5).unwrap();
        run(&mut controller, 3.0);

        let death = controller.action("Death").unwrap();
        assert!(death.is_clamped());
        assert_eq!(death.effective_weight(), 1.0);
        assert_eq!(controller.current_action_name(), "Death");
        assert_eq!(controller.restorations(), 0);
    }

    #[test]
    fn test_request_errors() {
        let mut controller = controller();

        assert_eq!(
            controller.select_state("Moonwalk", 0.5),
            Err(AnimationError::UnknownAction("Moonwalk".to_string()))
        );
        assert_eq!(
            controller.select_state("Wave", 0.5),
            Err(AnimationError::NotASteadyState("Wave".to_string()))
        );
        assert_eq!(
            controller.trigger_emote("Idle", 0.2),
            Err(AnimationError::NotAnEmote("Idle".to_string()))
        );

        // Nothing changed
        assert_eq!(controller.current_action_name(), "Idle");
        assert_eq!(controller.phase(), EmotePhase::Steady);
    }

    #[test]
    fn test_extra_clip_reachable_through_fade_to() {
        let mut controller = controller();
        controller.fade_to("WalkJump", 0.2).unwrap();
        assert_eq!(controller.current_action_name(), "WalkJump");
        assert_eq!(controller.requested_state(), "Idle");
    }

    #[test]
    fn test_fade_to_away_from_emote_cancels_restore() {
        let mut controller = controller();
        controller.trigger_emote("Wave", 0.2).unwrap();
        run(&mut controller, 0.1);

        controller.fade_to("WalkJump", 0.2).unwrap();
        assert_eq!(controller.phase(), EmotePhase::Steady);

        // Wave's end passes without pulling the character back to Idle
        run(&mut controller, 2.0);
        assert_eq!(controller.current_action_name(), "WalkJump");
        assert_eq!(controller.restorations(), 0);
    }
}
