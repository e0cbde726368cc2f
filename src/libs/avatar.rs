//! Avatar presentation.
//!
//! The avatar is a pure function of the server-supplied mood and animation
//! tag, the user level, the sampled time and a hover flag owned by the
//! caller. [`AvatarScene::compose`] turns those inputs into a scene
//! description (a colored body, a fixed face, two labels and the current
//! motion) that a renderer can draw as-is.
//!
//! ## Motion
//!
//! Each animation tier maps to a `(scale, y_offset)` pair:
//!
//! | tier           | scale                  | y offset          |
//! |----------------|------------------------|-------------------|
//! | `idle`         | 1.0                    | 0.1·sin(t)        |
//! | `happy_bounce` | 1.1                    | 0.3·\|sin(3t)\|   |
//! | `celebrate`    | 1.2 + 0.1·sin(4t)      | 0.5·\|sin(5t)\|   |
//!
//! Hovering adds 0.1, 0.15 or 0.2 to the scale, by tier.

use super::messages::Message;
use super::progress::deserialize_optional_xp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotional state of the avatar, decided by the server.
///
/// Unknown names are kept verbatim so they can still be labelled, but they
/// render with the neutral color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    Happy,
    Excited,
    #[default]
    Neutral,
    Sad,
    Tired,
    Unknown(String),
}

impl Mood {
    pub fn as_str(&self) -> &str {
        match self {
            Mood::Happy => "happy",
            Mood::Excited => "excited",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Tired => "tired",
            Mood::Unknown(name) => name,
        }
    }

    /// Body color for this mood as `#rrggbb`.
    pub fn color(&self) -> &'static str {
        match self {
            Mood::Happy => "#4ade80",
            Mood::Excited => "#facc15",
            Mood::Sad => "#94a3b8",
            Mood::Tired => "#a78bfa",
            Mood::Neutral | Mood::Unknown(_) => NEUTRAL_COLOR,
        }
    }

    /// Mood name with its first letter capitalized.
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

pub const NEUTRAL_COLOR: &str = "#60a5fa";
pub const FEATURE_COLOR: &str = "#1f2937";

impl From<String> for Mood {
    fn from(value: String) -> Self {
        match value.as_str() {
            "happy" => Mood::Happy,
            "excited" => Mood::Excited,
            "neutral" => Mood::Neutral,
            "sad" => Mood::Sad,
            "tired" => Mood::Tired,
            _ => Mood::Unknown(value),
        }
    }
}

impl From<&str> for Mood {
    fn from(value: &str) -> Self {
        Mood::from(value.to_string())
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        mood.as_str().to_string()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Motion hint sent by the server. Unrecognized tags fall back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Animation {
    #[default]
    Idle,
    HappyBounce,
    Celebrate,
}

impl Animation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Animation::Idle => "idle",
            Animation::HappyBounce => "happy_bounce",
            Animation::Celebrate => "celebrate",
        }
    }

    /// Scale added while the pointer hovers the avatar.
    pub fn hover_boost(&self) -> f32 {
        match self {
            Animation::Idle => 0.1,
            Animation::HappyBounce => 0.15,
            Animation::Celebrate => 0.2,
        }
    }

    /// Scale and vertical offset at `t` seconds.
    pub fn motion(&self, t: f32, hovered: bool) -> Motion {
        let (scale, y_offset) = match self {
            Animation::Idle => (1.0, 0.1 * t.sin()),
            Animation::HappyBounce => (1.1, 0.3 * (3.0 * t).sin().abs()),
            Animation::Celebrate => (1.2 + 0.1 * (4.0 * t).sin(), 0.5 * (5.0 * t).sin().abs()),
        };
        let boost = if hovered { self.hover_boost() } else { 0.0 };
        Motion {
            scale: scale + boost,
            y_offset,
        }
    }
}

impl From<String> for Animation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "happy_bounce" => Animation::HappyBounce,
            "celebrate" => Animation::Celebrate,
            _ => Animation::Idle,
        }
    }
}

impl From<Animation> for String {
    fn from(animation: Animation) -> Self {
        animation.as_str().to_string()
    }
}

/// Descriptor returned by `GET /api/avatar-state/{user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub animation: Animation,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default, deserialize_with = "deserialize_optional_xp")]
    pub xp: Option<u32>,
    #[serde(default)]
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Motion {
    pub scale: f32,
    pub y_offset: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sphere {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    pub left_eye: Sphere,
    pub right_eye: Sphere,
    pub mouth: Sphere,
}

impl Face {
    fn standard() -> Self {
        let feature = |position: [f32; 3], radius: f32| Sphere {
            position,
            radius,
            color: FEATURE_COLOR.to_string(),
        };
        Face {
            left_eye: feature([-0.35, 0.25, 0.9], 0.12),
            right_eye: feature([0.35, 0.25, 0.9], 0.12),
            mouth: feature([0.0, -0.25, 0.9], 0.08),
        }
    }
}

/// Renderable description of the avatar at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvatarScene {
    pub body: Sphere,
    pub face: Face,
    pub level_label: String,
    pub mood_label: String,
    pub animation: Animation,
    pub motion: Motion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AvatarScene {
    pub fn compose(mood: &Mood, animation: Animation, level: u32, t: f32, hovered: bool) -> Self {
        AvatarScene {
            body: Sphere {
                position: [0.0, 0.0, 0.0],
                radius: 1.0,
                color: mood.color().to_string(),
            },
            face: Face::standard(),
            level_label: Message::LevelLabel(level).to_string(),
            mood_label: mood.label(),
            animation,
            motion: animation.motion(t, hovered),
            message: None,
        }
    }

    pub fn with_message(mut self, message: Option<&str>) -> Self {
        self.message = message.map(str::to_string);
        self
    }
}
