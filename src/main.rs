//! Roboview - headless demo driver
//!
//! Replays a scripted input session against the RobotExpressive character and
//! logs where the viewpoint is and what the character is doing.
//!
//! Usage: `roboview [config.json]`

use anyhow::Context;
use roboview_game::{DemoConfig, DemoContext, DemoEvent, FrameOutput, KeyCode};

/// Total simulated time (seconds).
const SESSION_LENGTH: f64 = 14.0;

/// Scripted input: (time in seconds, event).
fn script() -> Vec<(f64, DemoEvent)> {
    use DemoEvent::*;

    vec![
        (0.5, Lock),
        // Walk forward, turning slightly
        (1.0, DemoEvent::key_down(KeyCode::KeyW)),
        (1.5, MouseMove { dx: 120.0, dy: -20.0 }),
        (2.5, DemoEvent::key_down(KeyCode::Space)),
        (3.0, DemoEvent::key_up(KeyCode::KeyW)),
        // Strafe
        (3.5, DemoEvent::key_down(KeyCode::KeyD)),
        (4.5, DemoEvent::key_up(KeyCode::KeyD)),
        // Emote that plays out
        (5.0, TriggerEmote("Wave".into())),
        // Emote interrupted by a state change
        (7.5, TriggerEmote("Punch".into())),
        (7.8, SelectState("Dance".into())),
        (9.0, SetExpression { name: "Surprised".into(), value: 0.8 }),
        // Clamped state, then an unknown one (logged, not fatal)
        (10.0, SelectState("Sitting".into())),
        (11.5, SelectState("Moonwalk".into())),
        (12.0, TriggerEmote("ThumbsUp".into())),
        (13.5, Unlock),
    ]
}

fn log_frame(out: &FrameOutput) {
    let p = out.eye_position;
    let blend = out
        .actions
        .iter()
        .map(|a| format!("{}={:.2}", a.name, a.weight))
        .collect::<Vec<_>>()
        .join(" ");
    log::info!(
        "frame {:5}  eye ({:7.2}, {:6.2}, {:7.2})  action {:<9} [{}]",
        out.frame,
        p.x,
        p.y,
        p.z,
        out.current_action,
        blend
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::from_json_file(&path).with_context(|| format!("loading {path}"))?,
        None => DemoConfig::default(),
    };

    let frame_time = config.frame_time();
    let frames_per_log = u64::from(config.tick_rate);
    let mut ctx = DemoContext::robot_expressive(config).context("setting up demo")?;

    let mut events = script().into_iter().peekable();
    let mut now = 0.0;

    while now <= SESSION_LENGTH {
        while let Some((_, event)) = events.next_if(|(at, _)| *at <= now) {
            log::debug!("t={now:.2}s {event:?}");
            if let Err(e) = ctx.dispatch(event) {
                log::error!("{e}");
            }
        }

        let out = ctx.frame(now);
        if (out.frame - 1) % frames_per_log == 0 {
            log_frame(&out);
        }

        now += frame_time;
    }

    log::info!(
        "session done: {} frames, {:.1}s, {} emote restorations",
        ctx.frame_count(),
        ctx.elapsed(),
        ctx.animation().restorations()
    );

    Ok(())
}
