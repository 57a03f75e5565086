//! Crossfade timing configuration.

use serde::{Deserialize, Serialize};

/// Fade durations and the initial steady state.
///
/// All durations are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Steady state playing when the controller is created.
    pub default_state: String,

    /// Fade used when the state selector changes.
    pub state_fade: f32,

    /// Fade into an emote.
    pub emote_fade: f32,

    /// Fade back to the steady state once an emote finishes.
    pub restore_fade: f32,

    /// Fade used when the forward key toggles Walking/Idle.
    pub walk_fade: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            default_state: "Idle".to_string(),
            state_fade: 0.5,
            emote_fade: 0.2,
            restore_fade: 0.2,
            walk_fade: 0.5,
        }
    }
}

impl AnimationConfig {
    /// Fades that are negative or not finite, by field name.
    pub fn invalid_fades(&self) -> Vec<&'static str> {
        [
            ("state_fade", self.state_fade),
            ("emote_fade", self.emote_fade),
            ("restore_fade", self.restore_fade),
            ("walk_fade", self.walk_fade),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_finite() || *value < 0.0)
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fades() {
        let config = AnimationConfig::default();
        assert_eq!(config.default_state, "Idle");
        assert_eq!(config.state_fade, 0.5);
        assert_eq!(config.emote_fade, 0.2);
        assert!(config.invalid_fades().is_empty());
    }

    #[test]
    fn test_invalid_fades() {
        let config = AnimationConfig {
            emote_fade: -0.1,
            walk_fade: f32::NAN,
            ..Default::default()
        };
        assert_eq!(config.invalid_fades(), vec!["emote_fade", "walk_fade"]);
    }
}
