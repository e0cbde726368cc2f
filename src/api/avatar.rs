//! `reqwest` implementation of [`AvatarApi`].
//!
//! ```rust,no_run
//! use avatask::api::{AvatarApi, AvatarClient};
//! use avatask::libs::config::ApiConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = AvatarClient::new(&ApiConfig::default())?;
//! println!("{}", client.health().await?);
//! # Ok(())
//! # }
//! ```

use super::{ApiError, AvatarApi};
use crate::libs::avatar::AvatarState;
use crate::libs::config::ApiConfig;
use crate::libs::task::{CompleteTask, NewTask, Task, TaskCompletion};
use crate::libs::user::{NewUser, User};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AvatarClient {
    client: Client,
    base_url: String,
}

/// Error body produced by the service (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Banner returned by the health endpoint.
#[derive(Debug, Deserialize)]
struct Banner {
    message: String,
}

impl AvatarClient {
    /// Builds a client for `config.base_url` with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the base URL is not an absolute
    /// http(s) URL, or a transport error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ApiError::InvalidUrl(config.base_url.clone())),
        }

        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint below `/api/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body).map(|e| e.detail).unwrap_or(body);
        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = Self::check(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl AvatarApi for AvatarClient {
    async fn health(&self) -> Result<String, ApiError> {
        let response = self.client.get(self.endpoint("")).send().await?;
        Ok(Self::decode::<Banner>(response).await?.message)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        debug!(name = %user.name, "creating user");
        let response = self.client.post(self.endpoint("users")).json(user).send().await?;
        Self::decode(response).await
    }

    async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        let response = self.client.get(self.endpoint(&format!("users/{}", user_id))).send().await?;
        Self::decode(response).await
    }

    async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, ApiError> {
        let response = self.client.get(self.endpoint(&format!("tasks/{}", user_id))).send().await?;
        Self::decode(response).await
    }

    async fn avatar_state(&self, user_id: &str) -> Result<AvatarState, ApiError> {
        let response = self.client.get(self.endpoint(&format!("avatar-state/{}", user_id))).send().await?;
        Self::decode(response).await
    }

    async fn create_task(&self, user_id: &str, task: &NewTask) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("tasks"))
            .query(&[("user_id", user_id)])
            .json(task)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn complete_task(&self, task_id: &str) -> Result<TaskCompletion, ApiError> {
        let response = self
            .client
            .post(self.endpoint("tasks/complete"))
            .json(&CompleteTask { task_id })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.endpoint(&format!("tasks/{}", task_id))).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
