//! Client side of the avatar productivity service.
//!
//! [`AvatarApi`] lists every HTTP operation the client consumes, one async
//! method each. [`AvatarClient`] implements it over `reqwest`; tests plug in
//! their own implementation to drive the store without a network.
//!
//! | Operation        | Method & Path                  |
//! |------------------|--------------------------------|
//! | Health check     | `GET /api/`                    |
//! | Create user      | `POST /api/users`              |
//! | Get user         | `GET /api/users/{id}`          |
//! | List tasks       | `GET /api/tasks/{user_id}`     |
//! | Get avatar state | `GET /api/avatar-state/{user_id}` |
//! | Create task      | `POST /api/tasks?user_id={id}` |
//! | Complete task    | `POST /api/tasks/complete`     |
//! | Delete task      | `DELETE /api/tasks/{id}`       |

use crate::libs::avatar::AvatarState;
use crate::libs::task::{NewTask, Task, TaskCompletion};
use crate::libs::user::{NewUser, User};
use thiserror::Error;

pub mod avatar;

pub use avatar::AvatarClient;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Operations offered by the remote task/user service.
#[allow(async_fn_in_trait)]
pub trait AvatarApi {
    /// Returns the service banner from `GET /api/`.
    async fn health(&self) -> Result<String, ApiError>;

    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError>;

    async fn get_user(&self, user_id: &str) -> Result<User, ApiError>;

    async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, ApiError>;

    async fn avatar_state(&self, user_id: &str) -> Result<AvatarState, ApiError>;

    /// Creates a task. The created task in the response is not used; callers re-fetch the list.
    async fn create_task(&self, user_id: &str, task: &NewTask) -> Result<(), ApiError>;

    async fn complete_task(&self, task_id: &str) -> Result<TaskCompletion, ApiError>;

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError>;
}
