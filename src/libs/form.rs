use super::task::{NewTask, DEFAULT_XP_REWARD};

/// Raw input of the task creation form.
///
/// Only the title is validated here; acceptable XP ranges are the server's call.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub xp_reward: String,
}

impl TaskForm {
    pub fn new(title: &str, description: &str, xp_reward: &str) -> Self {
        TaskForm {
            title: title.to_string(),
            description: description.to_string(),
            xp_reward: xp_reward.to_string(),
        }
    }

    /// Submission stays disabled while the title is blank.
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Typed reward, or [`DEFAULT_XP_REWARD`] when it is not an integer.
    pub fn xp_reward(&self) -> i32 {
        self.xp_reward.trim().parse().unwrap_or(DEFAULT_XP_REWARD)
    }

    pub fn submit(&self) -> Option<NewTask> {
        if !self.can_submit() {
            return None;
        }
        let description = self.description.trim();
        let description = (!description.is_empty()).then_some(description);
        Some(NewTask::new(self.title.trim(), description, self.xp_reward()))
    }
}
