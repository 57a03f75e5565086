//! Facial expression weights.
//!
//! Morph-target influences are set directly from sliders and passed through
//! to the renderer untouched by the crossfade controller.

use crate::error::GameError;

/// Morph-target name → influence in `[0, 1]`, in model order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expressions {
    weights: Vec<(String, f32)>,
}

impl Expressions {
    /// All named expressions at zero influence.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            weights: names.iter().map(|n| (n.as_ref().to_string(), 0.0)).collect(),
        }
    }

    /// Set an influence, clamped to `[0, 1]`.
    pub fn set(&mut self, name: &str, value: f32) -> Result<(), GameError> {
        let slot = self
            .weights
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| GameError::UnknownExpression(name.to_string()))?;
        slot.1 = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.weights.iter().find(|(n, _)| n == name).map(|(_, w)| *w)
    }

    pub fn as_slice(&self) -> &[(String, f32)] {
        &self.weights
    }
}
