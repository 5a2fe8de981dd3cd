use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use myday_core::TaskError;

use crate::dto::ErrorResponse;

/// Handler error: a [`TaskError`] plus the generic message shown to clients
/// when the store fails.
#[derive(Debug)]
pub struct ApiError {
    pub error: TaskError,
    pub public_message: &'static str,
}

impl ApiError {
    pub fn new(error: TaskError, public_message: &'static str) -> Self {
        Self {
            error,
            public_message,
        }
    }

    /// Adapter for `map_err`: `repo.list().await.map_err(ApiError::context("Server error"))`.
    pub fn context(public_message: &'static str) -> impl FnOnce(TaskError) -> Self {
        move |error| Self::new(error, public_message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TaskError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client errors carry their own description; store failures only the
    /// generic message.
    pub fn client_message(&self) -> String {
        if self.error.is_client_error() {
            self.error.to_string()
        } else {
            self.public_message.to_string()
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            TaskError::InvalidInput(rejection.body_text()),
            "Invalid request body",
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(
            TaskError::InvalidInput(rejection.body_text()),
            "Invalid task id",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.error.is_client_error() {
            tracing::warn!(kind = self.error.error_kind(), error = %self.error, "request rejected");
        } else {
            tracing::error!(kind = self.error.error_kind(), error = %self.error, "request failed");
        }
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myday_core::TaskId;

    #[test]
    fn status_per_kind() {
        assert_eq!(
            ApiError::new(TaskError::NotFound(TaskId::new(1)), "x").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::new(TaskError::InvalidInput("bad".into()), "x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::new(TaskError::StoreUnavailable("down".into()), "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_hide_raw_detail() {
        let err = ApiError::new(
            TaskError::StoreUnavailable("disk I/O error at /var/db".into()),
            "Failed to add task",
        );
        assert_eq!(err.client_message(), "Failed to add task");
    }

    #[test]
    fn client_errors_explain_themselves() {
        let err = ApiError::context("Failed to update task")(TaskError::NotFound(TaskId::new(9)));
        assert_eq!(err.client_message(), "task 9 not found");
    }

    #[tokio::test]
    async fn response_body_has_error_field() {
        let resp = ApiError::new(TaskError::StoreUnavailable("boom".into()), "Server error")
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed, serde_json::json!({"error": "Server error"}));
    }
}
