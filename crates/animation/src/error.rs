use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// The clip set lacks names the roster requires.
    #[error("animation clips missing for: {}", .0.join(", "))]
    MissingActions(Vec<String>),

    #[error("duplicate animation clip `{0}`")]
    DuplicateClip(String),

    #[error("clip `{name}` has invalid duration {duration}")]
    InvalidClip { name: String, duration: f32 },

    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("`{0}` is not an emote")]
    NotAnEmote(String),

    #[error("`{0}` is not a steady state")]
    NotASteadyState(String),
}

impl AnimationError {
    /// Errors raised while building the action table rather than at request time.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingActions(_) | Self::DuplicateClip(_) | Self::InvalidClip { .. }
        )
    }
}
