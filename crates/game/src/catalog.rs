//! Built-in clip metadata for the RobotExpressive character.
//!
//! The headless driver has no asset loader; this stands in for the clip list
//! a glTF loader would report.

use roboview_animation::ClipInfo;

/// Clip names and durations (seconds), in asset order.
const ROBOT_EXPRESSIVE_CLIPS: &[(&str, f32)] = &[
    ("Dance", 1.875),
    ("Death", 1.25),
    ("Idle", 2.0),
    ("Jump", 1.0),
    ("No", 1.75),
    ("Punch", 0.917),
    ("Running", 0.708),
    ("Sitting", 1.667),
    ("Standing", 1.292),
    ("ThumbsUp", 1.458),
    ("Walking", 1.042),
    ("WalkJump", 1.0),
    ("Wave", 1.667),
    ("Yes", 1.292),
];

/// Morph targets on the character's face mesh.
const ROBOT_EXPRESSIVE_EXPRESSIONS: &[&str] = &["Angry", "Surprised", "Sad"];

/// Clip list and expression names for one character asset.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipCatalog {
    pub clips: Vec<ClipInfo>,
    pub expressions: Vec<String>,
}

impl ClipCatalog {
    pub fn robot_expressive() -> Self {
        Self {
            clips: ROBOT_EXPRESSIVE_CLIPS
                .iter()
                .map(|(name, duration)| ClipInfo::new(*name, *duration))
                .collect(),
            expressions: ROBOT_EXPRESSIVE_EXPRESSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn clip(&self, name: &str) -> Option<&ClipInfo> {
        self.clips.iter().find(|clip| clip.name == name)
    }
}
