//! Per-frame clock.
//!
//! One delta per frame feeds both animation and physics, so the two never
//! drift apart.

/// Converts a monotonic timestamp into per-frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Timestamp of the previous frame (seconds).
    last: Option<f64>,
    /// Total time handed out as deltas (seconds).
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call.
    ///
    /// The first call returns zero. A timestamp earlier than the previous one
    /// also returns zero and does not move the clock backwards.
    pub fn advance(&mut self, now: f64) -> f32 {
        let delta = match self.last {
            Some(last) if now > last => now - last,
            Some(_) => return 0.0,
            None => 0.0,
        };
        self.last = Some(now);
        self.elapsed += delta;
        delta as f32
    }

    /// Total time elapsed since the first frame (seconds).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
