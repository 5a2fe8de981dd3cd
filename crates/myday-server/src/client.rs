//! Typed HTTP client for the task service.

use myday_core::{NewTask, Task, TaskId, UpdateTask, UpdateTaskBody};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::dto::{ErrorResponse, LivenessResponse, MessageResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => e.status(),
            Self::Api { status, .. } => Some(*status),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn liveness(&self) -> Result<LivenessResponse, ClientError> {
        decode(self.http.get(self.url("/")).send().await?).await
    }

    pub async fn list(&self) -> Result<Vec<Task>, ClientError> {
        decode(self.http.get(self.url("/tasks")).send().await?).await
    }

    pub async fn create(&self, title: impl Into<String>) -> Result<Task, ClientError> {
        let body = NewTask::new(title);
        decode(self.http.post(self.url("/tasks")).json(&body).send().await?).await
    }

    pub async fn update(&self, id: TaskId, update: UpdateTask) -> Result<Task, ClientError> {
        let body = UpdateTaskBody::from(update);
        let resp = self
            .http
            .put(self.url(&format!("/tasks/{id}")))
            .json(&body)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, ClientError> {
        self.update(id, UpdateTask::status(completed)).await
    }

    pub async fn edit_title(
        &self,
        id: TaskId,
        title: impl Into<String>,
    ) -> Result<Task, ClientError> {
        self.update(id, UpdateTask::title(title)).await
    }

    pub async fn delete(&self, id: TaskId) -> Result<MessageResponse, ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    Err(ClientError::Api { status, message })
}
