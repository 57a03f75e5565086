//! The demo's per-frame driver.
//!
//! [`DemoContext`] owns everything the demo mutates: held keys, the
//! viewpoint, the crossfade controller, and expression weights. Input events
//! arrive through [`DemoContext::dispatch`] between frames and
//! [`DemoContext::frame`] advances the world once per rendered frame. Both
//! take `&mut self`, so events and frames never interleave.

use glam::Vec3;
use roboview_animation::{ActionWeight, CrossfadeController, EmotePhase};
use roboview_physics::{InputState, MovementIntegrator, MovementState};

use crate::catalog::ClipCatalog;
use crate::clock::FrameClock;
use crate::config::DemoConfig;
use crate::error::GameError;
use crate::expression::Expressions;
use crate::input::{apply_key, DemoEvent, KeyAction};

/// What the render layer needs after a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Frames completed, including this one.
    pub frame: u64,
    /// Delta fed to animation and physics this frame (seconds).
    pub delta: f32,
    pub eye_position: Vec3,
    /// (pitch, yaw, roll) in radians.
    pub view_angles: Vec3,
    pub look_direction: Vec3,
    /// The viewpoint was clamped to the floor this frame.
    pub grounded: bool,
    /// Name of the action most recently faded in.
    pub current_action: String,
    /// Actions with nonzero blend weight.
    pub actions: Vec<ActionWeight>,
    pub expressions: Vec<(String, f32)>,
}

/// Explicit state of one running demo.
#[derive(Debug)]
pub struct DemoContext {
    config: DemoConfig,

    input: InputState,
    movement: MovementState,
    integrator: MovementIntegrator,

    animation: CrossfadeController,
    expressions: Expressions,

    clock: FrameClock,

    /// Pointer captured: movement and mouse look are live.
    locked: bool,

    frame: u64,
}

impl DemoContext {
    /// Build a context for a character described by `catalog`.
    ///
    /// Fails if the config is invalid or the catalog is missing clips the
    /// roster requires.
    pub fn new(config: DemoConfig, catalog: &ClipCatalog) -> Result<Self, GameError> {
        config.validate()?;

        let animation = CrossfadeController::new(&catalog.clips, &config.roster, config.animation.clone())?;
        let movement = MovementState::looking_at(config.spawn_position, config.look_target);
        let integrator = MovementIntegrator::new(config.movement.clone());

        log::info!(
            "demo ready: {} clips, spawn {:?}, playing {}",
            catalog.clips.len(),
            config.spawn_position,
            animation.current_action_name()
        );

        Ok(Self {
            input: InputState::new(),
            movement,
            integrator,
            animation,
            expressions: Expressions::new(&catalog.expressions),
            clock: FrameClock::new(),
            locked: false,
            frame: 0,
            config,
        })
    }

    /// Context for the built-in RobotExpressive character.
    pub fn robot_expressive(config: DemoConfig) -> Result<Self, GameError> {
        Self::new(config, &ClipCatalog::robot_expressive())
    }

    /// Apply one input event.
    ///
    /// An error leaves the context unchanged apart from the key flags, and
    /// the demo can keep running.
    pub fn dispatch(&mut self, event: DemoEvent) -> Result<(), GameError> {
        match event {
            DemoEvent::Key { code, pressed } => match apply_key(&mut self.input, code, pressed) {
                Some(KeyAction::SelectState(state)) => {
                    self.animation.select_state(state, self.config.animation.walk_fade)?;
                }
                Some(KeyAction::Jump) => {
                    if !self.integrator.jump(&mut self.movement, &mut self.input) {
                        log::trace!("jump ignored while airborne");
                    }
                }
                None => {}
            },
            DemoEvent::MouseMove { dx, dy } => {
                if self.locked {
                    self.integrator
                        .look(&mut self.movement, dx, dy, self.config.mouse_sensitivity);
                }
            }
            DemoEvent::SelectState(name) => {
                self.animation.select_state(&name, self.config.animation.state_fade)?;
            }
            DemoEvent::TriggerEmote(name) => {
                self.animation.trigger_emote(&name, self.config.animation.emote_fade)?;
            }
            DemoEvent::SetExpression { name, value } => self.expressions.set(&name, value)?,
            DemoEvent::Lock => {
                self.locked = true;
                log::debug!("pointer locked");
            }
            DemoEvent::Unlock => {
                self.locked = false;
                log::debug!("pointer unlocked");
            }
        }
        Ok(())
    }

    /// Advance one frame to timestamp `now` (seconds, monotonic).
    pub fn frame(&mut self, now: f64) -> FrameOutput {
        let delta = self.clock.advance(now);

        self.animation.tick(delta);

        let grounded = if self.locked {
            self.integrator
                .step(&mut self.movement, &mut self.input, delta)
                .landed
        } else {
            false
        };

        self.frame += 1;

        FrameOutput {
            frame: self.frame,
            delta,
            eye_position: self.movement.position,
            view_angles: self.movement.view_angles,
            look_direction: self.movement.look_direction(),
            grounded,
            current_action: self.animation.current_action_name().to_string(),
            actions: self.animation.weights(),
            expressions: self.expressions.as_slice().to_vec(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Seconds of simulated time so far.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn movement(&self) -> &MovementState {
        &self.movement
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn animation(&self) -> &CrossfadeController {
        &self.animation
    }

    pub fn emote_phase(&self) -> EmotePhase {
        self.animation.phase()
    }

    pub fn expressions(&self) -> &Expressions {
        &self.expressions
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use roboview_animation::AnimationError;

    const DT: f64 = 1.0 / 60.0;

    fn context() -> DemoContext {
        DemoContext::robot_expressive(DemoConfig::default()).unwrap()
    }

    /// Run frames for `seconds`, continuing from the context's clock.
    fn run(ctx: &mut DemoContext, start: &mut f64, seconds: f64) -> FrameOutput {
        let frames = (seconds / DT).ceil() as u32;
        let mut out = ctx.frame(*start);
        for _ in 0..frames {
            *start += DT;
            out = ctx.frame(*start);
        }
        out
    }

    #[test]
    fn test_context_creation() {
        let ctx = context();
        assert_eq!(ctx.frame_count(), 0);
        assert!(!ctx.is_locked());
        assert_eq!(ctx.movement().position, Vec3::new(-5.0, 3.0, 10.0));
        assert_eq!(ctx.animation().current_action_name(), "Idle");

        // Initially facing the character
        let look = ctx.movement().look_direction();
        let expected = (Vec3::new(0.0, 2.0, 0.0) - Vec3::new(-5.0, 3.0, 10.0)).normalize();
        assert!(look.dot(expected) > 0.999);
    }

    #[test]
    fn test_missing_clips_fail_setup() {
        let mut catalog = ClipCatalog::robot_expressive();
        catalog.clips.retain(|clip| clip.name != "Punch");

        let err = DemoContext::new(DemoConfig::default(), &catalog).unwrap_err();
        assert!(matches!(
            err,
            GameError::Animation(AnimationError::MissingActions(ref names)) if names == &["Punch".to_string()]
        ));
    }

    #[test]
    fn test_no_movement_while_unlocked() {
        let mut ctx = context();
        let mut t = 0.0;

        ctx.dispatch(DemoEvent::key_down(KeyCode::KeyW)).unwrap();
        ctx.dispatch(DemoEvent::MouseMove { dx: 200.0, dy: 0.0 }).unwrap();
        let out = run(&mut ctx, &mut t, 1.0);

        assert_eq!(out.eye_position, Vec3::new(-5.0, 3.0, 10.0));
        // Flags and animation still follow the keys
        assert!(ctx.input().movement.forward);
        assert_eq!(out.current_action, "Walking");
    }

    #[test]
    fn test_forward_key_walks_and_moves() {
        let mut ctx = context();
        let mut t = 0.0;
        ctx.dispatch(DemoEvent::Lock).unwrap();

        ctx.dispatch(DemoEvent::key_down(KeyCode::ArrowUp)).unwrap();
        let out = run(&mut ctx, &mut t, 1.0);

        let forward = ctx.movement().forward_direction();
        let moved = out.eye_position - Vec3::new(-5.0, 3.0, 10.0);
        assert!(moved.dot(forward) > 10.0);
        assert!((out.eye_position.y - 10.0).abs() < 1e-4);
        assert!(out.grounded);
        assert_eq!(out.current_action, "Walking");

        ctx.dispatch(DemoEvent::key_up(KeyCode::ArrowUp)).unwrap();
        let out = run(&mut ctx, &mut t, 0.6);
        assert_eq!(out.current_action, "Idle");
        assert_eq!(out.actions.len(), 1);
    }

    #[test]
    fn test_jump_requires_landing() {
        let mut ctx = context();
        let mut t = 0.0;

        // Spawned below the floor: no jump until the first clamp
        ctx.dispatch(DemoEvent::key_down(KeyCode::Space)).unwrap();
        assert_eq!(ctx.movement().velocity.y, 0.0);

        ctx.dispatch(DemoEvent::Lock).unwrap();
        run(&mut ctx, &mut t, 0.1);
        assert!(ctx.input().can_jump);

        ctx.dispatch(DemoEvent::key_down(KeyCode::Space)).unwrap();
        assert_eq!(ctx.movement().velocity.y, 350.0);
        assert!(!ctx.input().can_jump);

        // Mashing in the air does nothing
        ctx.dispatch(DemoEvent::key_down(KeyCode::Space)).unwrap();
        assert_eq!(ctx.movement().velocity.y, 350.0);

        let out = run(&mut ctx, &mut t, 0.05);
        assert!(out.eye_position.y > 10.0);
    }

    #[test]
    fn test_mouse_look_only_while_locked() {
        let mut ctx = context();
        let yaw = ctx.movement().view_angles.y;

        ctx.dispatch(DemoEvent::MouseMove { dx: 100.0, dy: 0.0 }).unwrap();
        assert_eq!(ctx.movement().view_angles.y, yaw);

        ctx.dispatch(DemoEvent::Lock).unwrap();
        ctx.dispatch(DemoEvent::MouseMove { dx: 100.0, dy: 0.0 }).unwrap();
        assert!((ctx.movement().view_angles.y - (yaw + 0.2)).abs() < 1e-5);
    }

    #[test]
    fn test_request_errors_do_not_break_the_demo() {
        let mut ctx = context();
        let mut t = 0.0;

        let err = ctx.dispatch(DemoEvent::SelectState("Moonwalk".into())).unwrap_err();
        assert!(err.is_recoverable());
        assert!(ctx.dispatch(DemoEvent::TriggerEmote("Idle".into())).is_err());
        assert!(matches!(
            ctx.dispatch(DemoEvent::SetExpression { name: "Smug".into(), value: 1.0 }),
            Err(GameError::UnknownExpression(_))
        ));

        ctx.dispatch(DemoEvent::SelectState("Dance".into())).unwrap();
        let out = run(&mut ctx, &mut t, 0.6);
        assert_eq!(out.current_action, "Dance");
    }

    #[test]
    fn test_emote_restores_selected_state() {
        let mut ctx = context();
        let mut t = 0.0;

        ctx.dispatch(DemoEvent::SelectState("Running".into())).unwrap();
        run(&mut ctx, &mut t, 0.6);

        ctx.dispatch(DemoEvent::TriggerEmote("Punch".into())).unwrap();
        let out = run(&mut ctx, &mut t, 0.3);
        assert_eq!(out.current_action, "Punch");

        // Punch is 0.917s long
        let out = run(&mut ctx, &mut t, 1.0);
        assert_eq!(out.current_action, "Running");
        assert_eq!(ctx.animation().restorations(), 1);
    }

    #[test]
    fn test_expressions_pass_through() {
        let mut ctx = context();
        ctx.dispatch(DemoEvent::SetExpression { name: "Sad".into(), value: 0.75 }).unwrap();

        let out = ctx.frame(0.0);
        assert!(out.expressions.contains(&("Sad".to_string(), 0.75)));
        assert_eq!(out.current_action, "Idle");
    }
}
