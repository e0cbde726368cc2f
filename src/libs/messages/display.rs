//! Display implementation for avatask application messages.
//!
//! All user-facing text lives here so the wording stays consistent between
//! one-shot commands, the interactive `play` loop and the transient notices
//! kept by the store. Failure texts are deliberately generic: network,
//! validation and server errors all read the same to the user.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::ConnectingToBackend(url) => format!("Connecting to {}...", url),
            Message::ConnectionFailed => "Failed to connect to server. Please refresh the page.".to_string(),
            Message::ReloadRequired => "The session cannot continue. Restart avatask to try again.".to_string(),
            Message::UserCreated(name) => format!("Welcome, {}! Your avatar has been created.", name),
            Message::WelcomeBack(name) => format!("Welcome back, {}!", name),
            Message::IdentityCleared => "Cached user identity removed. A new user will be created on next start.".to_string(),
            Message::IdentityClearFailed(error) => format!("Failed to remove cached user identity: {}", error),

            // === TASK MESSAGES ===
            Message::TaskCreated => "Task created".to_string(),
            Message::TaskDeleted => "Task deleted".to_string(),
            Message::TaskCompleted(xp) => format!("Task completed! +{} XP", xp),
            Message::LevelUp(level) => format!("Level up! You reached level {}", level),
            Message::TaskCreateFailed => "Failed to create task".to_string(),
            Message::TaskCompleteFailed => "Failed to complete task".to_string(),
            Message::TaskDeleteFailed => "Failed to delete task".to_string(),
            Message::TasksRefreshFailed => "Failed to load tasks".to_string(),
            Message::TaskTitleRequired => "Task title cannot be empty".to_string(),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TasksHeader => "Your Quests".to_string(),
            Message::NoTasks => "No tasks yet. Add your first quest!".to_string(),
            Message::NoOpenTasks => "No open tasks to complete.".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),

            // === AVATAR MESSAGES ===
            Message::AvatarHeader => "Your Avatar".to_string(),
            Message::AvatarRefreshFailed => "Failed to load avatar state".to_string(),
            Message::AvatarPetted => "Your avatar wiggles happily!".to_string(),
            Message::AvatarSays(text) => format!("💬 {}", text),
            Message::LevelLabel(level) => format!("Level {}", level),
            Message::ProgressLabel { current, per_level } => format!("{}/{} XP", current, per_level),

            // === HEALTH MESSAGES ===
            Message::BackendHealthy(text) => format!("Backend is up: {}", text),
            Message::BackendUnreachable => "Backend is not reachable".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleApi => "Backend settings".to_string(),
            Message::ConfigModuleProfile => "Profile settings".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select the settings to configure".to_string(),
            Message::PromptBackendUrl => "Enter the backend URL".to_string(),
            Message::PromptRequestTimeout => "Enter request timeout (seconds)".to_string(),
            Message::PromptProfileName => "Enter your name".to_string(),
            Message::PromptProfileEmail => "Enter your email".to_string(),
            Message::PromptSelectAction => "What do you want to do?".to_string(),
            Message::PromptTaskTitle => "Task title".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskXp => "XP reward (5-100)".to_string(),
            Message::PromptSelectTask => "Select a task".to_string(),

            // === PLAY ACTIONS ===
            Message::ActionAddTask => "Add task".to_string(),
            Message::ActionCompleteTask => "Complete task".to_string(),
            Message::ActionDeleteTask => "Delete task".to_string(),
            Message::ActionPetAvatar => "Pet avatar".to_string(),
            Message::ActionRefresh => "Refresh".to_string(),
            Message::ActionQuit => "Quit".to_string(),
            Message::Goodbye => "See you soon! Your avatar will miss you.".to_string(),
        };
        write!(f, "{}", text)
    }
}
