use super::avatar::Mood;
use super::progress::deserialize_xp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Reward used when the form input does not parse as an integer.
pub const DEFAULT_XP_REWARD: i32 = 10;

/// A task as returned by `GET /api/tasks/{user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_xp_reward")]
    pub xp_reward: i32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

fn default_xp_reward() -> i32 {
    DEFAULT_XP_REWARD
}

impl Task {
    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

/// Body of `POST /api/tasks?user_id=...`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub xp_reward: i32,
}

impl NewTask {
    pub fn new(title: &str, description: Option<&str>, xp_reward: i32) -> Self {
        NewTask {
            title: title.to_string(),
            description: description.map(str::to_string),
            xp_reward,
        }
    }
}

/// Body of `POST /api/tasks/complete`.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteTask<'a> {
    pub task_id: &'a str,
}

/// Server verdict for a completed task.
///
/// XP, level and mood are authoritative; the client merges them into its
/// user mirror as-is and never recomputes them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskCompletion {
    #[serde(deserialize_with = "deserialize_xp")]
    pub new_xp: u32,
    pub new_level: u32,
    pub avatar_mood: Mood,
    pub xp_gained: i32,
    pub level_up: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ai_message: Option<String>,
}
