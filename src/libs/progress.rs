//! Level progress arithmetic.
//!
//! The server decides the level; the client only shows how far the user is
//! into the current one, which is always `xp mod 100`.

use super::user::User;
use serde::{Deserialize, Deserializer};

pub const XP_PER_LEVEL: u32 = 100;

/// Floors a server XP total at zero.
///
/// The service accepts negative task rewards and never clamps the sum, so a
/// user's total can go below zero on the wire.
pub fn clamp_xp(xp: i64) -> u32 {
    xp.clamp(0, u32::MAX as i64) as u32
}

pub(crate) fn deserialize_xp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(clamp_xp(i64::deserialize(deserializer)?))
}

pub(crate) fn deserialize_optional_xp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.map(clamp_xp))
}

/// Experience collected inside the current level, in `[0, XP_PER_LEVEL)`.
pub fn progress_within_level(xp: u32) -> u32 {
    xp % XP_PER_LEVEL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    pub current: u32,
    pub per_level: u32,
}

impl LevelProgress {
    pub fn new(xp: u32, level: u32) -> Self {
        LevelProgress {
            level,
            current: progress_within_level(xp),
            per_level: XP_PER_LEVEL,
        }
    }

    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.per_level as f32
    }

    /// Text progress bar of `width` cells.
    pub fn bar(&self, width: usize) -> String {
        let filled = (self.current as usize * width) / self.per_level as usize;
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }
}

impl From<&User> for LevelProgress {
    fn from(user: &User) -> Self {
        LevelProgress::new(user.xp, user.level)
    }
}
