#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === SESSION MESSAGES ===
    ConnectingToBackend(String), // base url
    ConnectionFailed,
    ReloadRequired,
    UserCreated(String), // user name
    WelcomeBack(String), // user name
    IdentityCleared,
    IdentityClearFailed(String), // error message

    // === TASK MESSAGES ===
    TaskCreated,
    TaskDeleted,
    TaskCompleted(i32), // xp gained
    LevelUp(u32),       // new level
    TaskCreateFailed,
    TaskCompleteFailed,
    TaskDeleteFailed,
    TasksRefreshFailed,
    TaskTitleRequired,
    TaskNotFoundWithId(String),
    TasksHeader,
    NoTasks,
    NoOpenTasks,
    ConfirmDeleteTask(String), // task title

    // === AVATAR MESSAGES ===
    AvatarHeader,
    AvatarRefreshFailed,
    AvatarPetted,
    AvatarSays(String),
    LevelLabel(u32),
    ProgressLabel { current: u32, per_level: u32 },

    // === HEALTH MESSAGES ===
    BackendHealthy(String), // service message
    BackendUnreachable,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleApi,
    ConfigModuleProfile,

    // === PROMPTS ===
    PromptSelectModules,
    PromptBackendUrl,
    PromptRequestTimeout,
    PromptProfileName,
    PromptProfileEmail,
    PromptSelectAction,
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskXp,
    PromptSelectTask,

    // === PLAY ACTIONS ===
    ActionAddTask,
    ActionCompleteTask,
    ActionDeleteTask,
    ActionPetAvatar,
    ActionRefresh,
    ActionQuit,
    Goodbye,
}
