use super::avatar::Mood;
use super::progress::deserialize_xp;
use super::task::TaskCompletion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_xp")]
    pub xp: u32,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub avatar_mood: Mood,
}

fn first_level() -> u32 {
    1
}

impl User {
    /// Copies the server-confirmed progression fields from a completion response.
    pub fn apply_completion(&mut self, completion: &TaskCompletion) {
        self.xp = completion.new_xp;
        self.level = completion.new_level;
        self.avatar_mood = completion.avatar_mood.clone();
    }
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: &str, email: &str) -> Self {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}
