//! Client state store and sync protocol.
//!
//! A [`Store`] is the session context: it is built once at startup and
//! handed to every handler by `&mut`. It mirrors the server's view of the
//! user, the task list and the avatar state, and never derives any of them
//! locally.
//!
//! ## Session Lifecycle
//!
//! ```text
//! Uninitialized ──connect()──▶ Ready ──▶ (mutations, refreshes)
//!        │
//!        └──── failure ──────▶ Failed   (terminal for this session)
//! ```
//!
//! ## Mutations
//!
//! Creating, completing and deleting a task all follow the same shape: issue
//! the request, then re-fetch the task list whatever the outcome. Completion
//! also re-fetches the avatar state and merges the returned XP, level and
//! mood into the user. There is no optimistic update, so a failure has
//! nothing to roll back; it is logged and shown as a short-lived [`Notice`].
//! A failed re-fetch after a mutation is only logged, so the mutation's own
//! notice stays visible.
//!
//! Mutations take `&mut self` and are therefore serialized per session.
//! Refreshes carry a ticket from a [`RequestSequence`] and a response older
//! than the last applied one is dropped.

use super::avatar::{AvatarScene, AvatarState};
use super::config::ProfileConfig;
use super::identity::IdentityCache;
use super::messages::{self, Message};
use super::progress::LevelProgress;
use super::task::{NewTask, Task, TaskCompletion};
use super::user::{NewUser, User};
use crate::api::{ApiError, AvatarApi};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub const CREATE_NOTICE_TTL: Duration = Duration::from_secs(3);
pub const COMPLETE_NOTICE_TTL: Duration = Duration::from_secs(5);
pub const DELETE_NOTICE_TTL: Duration = Duration::from_secs(2);
pub const REFRESH_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Error, Debug)]
pub enum StoreError {
    /// The session has not connected yet.
    #[error("session is not connected")]
    NotReady,

    /// An earlier connection attempt failed; the session cannot be reused.
    #[error("session failed to connect; restart required")]
    Failed,

    #[error("connection failed: {0}")]
    Connection(#[source] ApiError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Failed,
}

/// How the user was resolved on connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Created,
    Restored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient banner text with an expiry.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    expires_at: Instant,
}

impl Notice {
    pub fn success(text: String, ttl: Duration) -> Self {
        Self::at(NoticeKind::Success, text, Instant::now(), ttl)
    }

    pub fn error(text: String, ttl: Duration) -> Self {
        Self::at(NoticeKind::Error, text, Instant::now(), ttl)
    }

    pub fn at(kind: NoticeKind, text: String, shown_at: Instant, ttl: Duration) -> Self {
        Notice {
            kind,
            text,
            expires_at: shown_at + ttl,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Ticket of one refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic request numbering; only responses newer than the last applied one are accepted.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
    applied: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Marks `ticket` as applied. Returns `false` when a newer response already landed.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        true
    }
}

pub struct Store<A: AvatarApi> {
    api: A,
    identity: IdentityCache,
    profile: ProfileConfig,
    state: SessionState,
    connection: Option<Connection>,
    user: Option<User>,
    tasks: Vec<Task>,
    avatar: Option<AvatarState>,
    notice: Option<Notice>,
    tasks_seq: RequestSequence,
    avatar_seq: RequestSequence,
}

impl<A: AvatarApi> Store<A> {
    pub fn new(api: A, identity: IdentityCache, profile: ProfileConfig) -> Self {
        Store {
            api,
            identity,
            profile,
            state: SessionState::Uninitialized,
            connection: None,
            user: None,
            tasks: Vec::new(),
            avatar: None,
            notice: None,
            tasks_seq: RequestSequence::default(),
            avatar_seq: RequestSequence::default(),
        }
    }

    #[doc(hidden)]
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.is_open())
    }

    pub fn avatar(&self) -> Option<&AvatarState> {
        self.avatar.as_ref()
    }

    pub fn progress(&self) -> Option<LevelProgress> {
        self.user.as_ref().map(LevelProgress::from)
    }

    /// The current notice, unless it has expired by `now`.
    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_active(now))
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Finds a task by exact id, or by an id prefix that matches exactly one task.
    pub fn find_task(&self, key: &str) -> Option<&Task> {
        if let Some(task) = self.tasks.iter().find(|task| task.id == key) {
            return Some(task);
        }
        let mut matches = self.tasks.iter().filter(|task| !key.is_empty() && task.id.starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Some(task),
            _ => None,
        }
    }

    /// Composes the avatar scene from the user's mood and level and the latest animation tag.
    pub fn scene(&self, t: f32, hovered: bool) -> Option<AvatarScene> {
        let user = self.user.as_ref()?;
        let avatar = self.avatar.as_ref();
        let animation = avatar.map(|state| state.animation).unwrap_or_default();
        let message = avatar.and_then(|state| state.message.as_deref());
        Some(AvatarScene::compose(&user.avatar_mood, animation, user.level, t, hovered).with_message(message))
    }

    /// Resolves the session user, then loads tasks and avatar state.
    ///
    /// A cached user id is fetched; without one a new user is created from
    /// the profile and its id cached. Any failure moves the session to
    /// [`SessionState::Failed`]. Calling it again on a ready store does no
    /// I/O and returns how the user was resolved the first time.
    pub async fn connect(&mut self) -> Result<Connection, StoreError> {
        match (self.state, self.connection) {
            (SessionState::Ready, Some(connection)) => return Ok(connection),
            (SessionState::Failed, _) => return Err(StoreError::Failed),
            _ => {}
        }

        let resolved = self.resolve_user().await;
        let (user, connection) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                error!("session initialization failed: {}", e);
                self.state = SessionState::Failed;
                return Err(e);
            }
        };

        info!(user_id = %user.id, ?connection, "session ready");
        self.user = Some(user);
        self.connection = Some(connection);
        self.state = SessionState::Ready;
        self.refresh_all().await;
        Ok(connection)
    }

    async fn resolve_user(&mut self) -> Result<(User, Connection), StoreError> {
        match self.identity.load()? {
            Some(user_id) => {
                debug!(%user_id, "fetching cached user");
                let user = self.api.get_user(&user_id).await.map_err(StoreError::Connection)?;
                Ok((user, Connection::Restored))
            }
            None => {
                let new_user = NewUser::new(&self.profile.name, &self.profile.email);
                let user = self.api.create_user(&new_user).await.map_err(StoreError::Connection)?;
                self.identity.store(&user.id)?;
                Ok((user, Connection::Created))
            }
        }
    }

    fn ready_user_id(&self) -> Result<String, StoreError> {
        match (self.state, &self.user) {
            (SessionState::Ready, Some(user)) => Ok(user.id.clone()),
            (SessionState::Failed, _) => Err(StoreError::Failed),
            _ => Err(StoreError::NotReady),
        }
    }

    /// Fetches the task list and the avatar state concurrently.
    pub async fn refresh_all(&mut self) {
        let Ok(user_id) = self.ready_user_id() else {
            return;
        };
        self.sync(&user_id, true).await;
    }

    /// Fetches tasks and avatar state together. With `notify` unset a failure
    /// is only logged, leaving the current notice in place.
    async fn sync(&mut self, user_id: &str, notify: bool) {
        let tasks_ticket = self.tasks_seq.issue();
        let avatar_ticket = self.avatar_seq.issue();
        let (tasks, avatar) = tokio::join!(self.api.list_tasks(user_id), self.api.avatar_state(user_id));
        self.receive_tasks(tasks_ticket, tasks, notify);
        self.receive_avatar(avatar_ticket, avatar, notify);
    }

    pub async fn refresh_tasks(&mut self) {
        let Ok(user_id) = self.ready_user_id() else {
            return;
        };
        self.fetch_tasks(&user_id, true).await;
    }

    async fn fetch_tasks(&mut self, user_id: &str, notify: bool) {
        let ticket = self.tasks_seq.issue();
        let tasks = self.api.list_tasks(user_id).await;
        self.receive_tasks(ticket, tasks, notify);
    }

    pub async fn refresh_avatar(&mut self) {
        let Ok(user_id) = self.ready_user_id() else {
            return;
        };
        let ticket = self.avatar_seq.issue();
        let avatar = self.api.avatar_state(&user_id).await;
        self.apply_avatar(ticket, avatar);
    }

    /// Stores a task list response if it is not stale.
    pub fn apply_tasks(&mut self, ticket: Ticket, result: Result<Vec<Task>, ApiError>) {
        self.receive_tasks(ticket, result, true);
    }

    fn receive_tasks(&mut self, ticket: Ticket, result: Result<Vec<Task>, ApiError>, notify: bool) {
        match result {
            Ok(tasks) => {
                if self.tasks_seq.accept(ticket) {
                    debug!(?ticket, count = tasks.len(), "task list applied");
                    self.tasks = tasks;
                } else {
                    warn!(?ticket, "discarding stale task list");
                }
            }
            Err(e) => {
                error!("error fetching tasks: {}", e);
                if notify {
                    self.notice = Some(Notice::error(messages::error(Message::TasksRefreshFailed), REFRESH_NOTICE_TTL));
                }
            }
        }
    }

    /// Stores an avatar state response if it is not stale.
    pub fn apply_avatar(&mut self, ticket: Ticket, result: Result<AvatarState, ApiError>) {
        self.receive_avatar(ticket, result, true);
    }

    fn receive_avatar(&mut self, ticket: Ticket, result: Result<AvatarState, ApiError>, notify: bool) {
        match result {
            Ok(avatar) => {
                if self.avatar_seq.accept(ticket) {
                    debug!(?ticket, animation = avatar.animation.as_str(), "avatar state applied");
                    self.avatar = Some(avatar);
                } else {
                    warn!(?ticket, "discarding stale avatar state");
                }
            }
            Err(e) => {
                error!("error fetching avatar state: {}", e);
                if notify {
                    self.notice = Some(Notice::error(messages::error(Message::AvatarRefreshFailed), REFRESH_NOTICE_TTL));
                }
            }
        }
    }

    #[doc(hidden)]
    pub fn issue_tasks_ticket(&mut self) -> Ticket {
        self.tasks_seq.issue()
    }

    #[doc(hidden)]
    pub fn issue_avatar_ticket(&mut self) -> Ticket {
        self.avatar_seq.issue()
    }

    /// Creates a task and re-fetches the list. Returns whether the server accepted it.
    pub async fn create_task(&mut self, task: NewTask) -> Result<bool, StoreError> {
        let user_id = self.ready_user_id()?;
        let created = match self.api.create_task(&user_id, &task).await {
            Ok(()) => {
                info!(title = %task.title, xp_reward = task.xp_reward, "task created");
                self.notice = Some(Notice::success(messages::success(Message::TaskCreated), CREATE_NOTICE_TTL));
                true
            }
            Err(e) => {
                error!("error creating task: {}", e);
                self.notice = Some(Notice::error(messages::error(Message::TaskCreateFailed), CREATE_NOTICE_TTL));
                false
            }
        };
        self.fetch_tasks(&user_id, false).await;
        Ok(created)
    }

    /// Completes a task, merges the server's progression into the user and
    /// re-fetches tasks and avatar state.
    pub async fn complete_task(&mut self, task_id: &str) -> Result<Option<TaskCompletion>, StoreError> {
        let user_id = self.ready_user_id()?;
        let completion = match self.api.complete_task(task_id).await {
            Ok(completion) => {
                info!(
                    %task_id,
                    xp_gained = completion.xp_gained,
                    new_level = completion.new_level,
                    level_up = completion.level_up,
                    "task completed"
                );
                if let Some(user) = self.user.as_mut() {
                    user.apply_completion(&completion);
                }
                self.notice = Some(Notice::success(completion_text(&completion), COMPLETE_NOTICE_TTL));
                Some(completion)
            }
            Err(e) => {
                error!("error completing task: {}", e);
                self.notice = Some(Notice::error(messages::error(Message::TaskCompleteFailed), COMPLETE_NOTICE_TTL));
                None
            }
        };

        self.sync(&user_id, false).await;

        Ok(completion)
    }

    /// Deletes a task, completed or not, and re-fetches the list.
    pub async fn delete_task(&mut self, task_id: &str) -> Result<bool, StoreError> {
        let user_id = self.ready_user_id()?;
        let deleted = match self.api.delete_task(task_id).await {
            Ok(()) => {
                info!(%task_id, "task deleted");
                self.notice = Some(Notice::success(messages::success(Message::TaskDeleted), DELETE_NOTICE_TTL));
                true
            }
            Err(e) => {
                error!("error deleting task: {}", e);
                self.notice = Some(Notice::error(messages::error(Message::TaskDeleteFailed), DELETE_NOTICE_TTL));
                false
            }
        };
        self.fetch_tasks(&user_id, false).await;
        Ok(deleted)
    }
}

/// Success text for a completion, annotated when the server reports a level up.
pub fn completion_text(completion: &TaskCompletion) -> String {
    let mut text = messages::success(Message::TaskCompleted(completion.xp_gained));
    if completion.level_up {
        text.push_str(&format!(" 🎉 {}", Message::LevelUp(completion.new_level)));
    }
    text
}
