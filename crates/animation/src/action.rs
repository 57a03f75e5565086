//! Playback handle for a single clip.
//!
//! An [`Action`] tracks local time, playback rate and blend weight for one
//! clip. Weight changes go through a linear ramp so that handing control from
//! one action to another never cuts discontinuously.

use serde::{Deserialize, Serialize};

/// How an action behaves when local time reaches the clip end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    /// Wrap back to the start.
    Loop,
    /// Play once and hold the final pose.
    OnceClamped,
}

/// Reported by [`Action::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    /// A clamped action reached its end this update.
    Finished,
}

/// Linear weight ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WeightRamp {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl WeightRamp {
    fn value(&self) -> f32 {
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            self.to
        } else {
            self.from + (self.to - self.from) * (self.elapsed / self.duration)
        }
    }

    fn is_done(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }
}

/// A playback handle.
///
/// Mirrors the usual clip-action surface: `reset`, `play`, `stop`,
/// `fade_in`, `fade_out`, effective weight and time scale.
#[derive(Debug, Clone)]
pub struct Action {
    name: String,
    /// Clip length in seconds.
    duration: f32,
    mode: PlayMode,

    /// Local time in seconds.
    time: f32,
    time_scale: f32,

    /// Weight set by the caller; scaled by the fade factor.
    weight: f32,
    /// Current fade factor (0.0 - 1.0).
    fade: f32,
    ramp: Option<WeightRamp>,

    /// `play` was called and `stop` was not.
    running: bool,
    /// Cleared when a fade-out completes; `reset` sets it again.
    enabled: bool,
    /// Holding the final pose of a clamped clip.
    clamped: bool,
}

impl Action {
    /// Create a stopped action for a clip.
    pub fn new(name: impl Into<String>, duration: f32, mode: PlayMode) -> Self {
        Self {
            name: name.into(),
            duration,
            mode,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            fade: 0.0,
            ramp: None,
            running: false,
            enabled: true,
            clamped: false,
        }
    }

    /// Rewind to the start and re-enable.
    ///
    /// Weight and any fade in progress are untouched.
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.enabled = true;
        self.clamped = false;
        self
    }

    /// Start (or keep) the action running.
    ///
    /// A running action advances even while its weight is zero, so it can be
    /// faded back in without restarting.
    pub fn play(&mut self) -> &mut Self {
        self.running = true;
        self
    }

    /// Stop immediately: no fade, weight drops to zero, time rewinds.
    pub fn stop(&mut self) -> &mut Self {
        self.running = false;
        self.fade = 0.0;
        self.ramp = None;
        self.time = 0.0;
        self.clamped = false;
        self
    }

    pub fn set_effective_time_scale(&mut self, scale: f32) -> &mut Self {
        self.time_scale = scale.max(0.0);
        self
    }

    pub fn set_effective_weight(&mut self, weight: f32) -> &mut Self {
        self.weight = weight.clamp(0.0, 1.0);
        self.enabled = true;
        self
    }

    /// Ramp the fade factor from its current value to 1 over `duration`.
    pub fn fade_in(&mut self, duration: f32) -> &mut Self {
        self.schedule_fade(1.0, duration)
    }

    /// Ramp the fade factor from its current value to 0 over `duration`.
    pub fn fade_out(&mut self, duration: f32) -> &mut Self {
        self.schedule_fade(0.0, duration)
    }

    fn schedule_fade(&mut self, to: f32, duration: f32) -> &mut Self {
        let ramp = WeightRamp {
            from: self.fade,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        };
        if ramp.is_done() {
            self.finish_ramp(to);
        } else {
            self.ramp = Some(ramp);
        }
        self
    }

    fn finish_ramp(&mut self, to: f32) {
        self.fade = to;
        self.ramp = None;
        if to == 0.0 {
            self.enabled = false;
        }
    }

    /// Advance local time and the fade ramp.
    ///
    /// Disabled or stopped actions do not move. A clamped action reports
    /// [`ActionEvent::Finished`] exactly once, on the update that reaches the
    /// end of the clip.
    pub fn update(&mut self, delta_time: f32) -> Option<ActionEvent> {
        if !self.is_running() {
            return None;
        }

        let event = self.update_time(delta_time * self.time_scale);
        self.update_ramp(delta_time);
        event
    }

    fn update_time(&mut self, dt: f32) -> Option<ActionEvent> {
        if self.clamped {
            return None;
        }

        self.time += dt;
        match self.mode {
            PlayMode::Loop => {
                if self.duration > 0.0 && self.time >= self.duration {
                    self.time %= self.duration;
                }
                None
            }
            PlayMode::OnceClamped => {
                if self.time >= self.duration {
                    self.time = self.duration;
                    self.clamped = true;
                    Some(ActionEvent::Finished)
                } else {
                    None
                }
            }
        }
    }

    fn update_ramp(&mut self, dt: f32) {
        if let Some(mut ramp) = self.ramp {
            ramp.elapsed += dt;
            if ramp.is_done() {
                self.finish_ramp(ramp.to);
            } else {
                self.fade = ramp.value();
                self.ramp = Some(ramp);
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Local time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Blend weight the renderer should use this frame.
    pub fn effective_weight(&self) -> f32 {
        if self.enabled {
            self.weight * self.fade
        } else {
            0.0
        }
    }

    /// Weight the action is heading toward.
    pub fn target_weight(&self) -> f32 {
        let to = self.ramp.map(|r| r.to).unwrap_or(self.fade);
        if self.enabled {
            self.weight * to
        } else {
            0.0
        }
    }

    /// A fade is in progress.
    pub fn is_fading(&self) -> bool {
        self.ramp.is_some()
    }

    /// Running and enabled: local time advances on update.
    pub fn is_running(&self) -> bool {
        self.running && self.enabled
    }

    /// Holding the last frame of a clamped clip.
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }
}
