//! Request handlers. Each one issues exactly one repository call.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use tracing::info;

use myday_core::{NewTask, Task, TaskId, UpdateTask, UpdateTaskBody};

use crate::dto::{HealthResponse, LivenessResponse, MessageResponse};
use crate::error::ApiError;
use crate::server::AppState;

pub const LIVENESS_MESSAGE: &str = "Task Manager Backend is Live!";
pub const DELETED_MESSAGE: &str = "Task deleted";

/// GET /
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: LIVENESS_MESSAGE.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let health = HealthResponse::from_store(state.repo.ping().await.is_ok());
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .repo
        .list()
        .await
        .map_err(ApiError::context("Server error"))?;
    Ok(Json(tasks))
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(input) = body?;
    let task = state
        .repo
        .create(input)
        .await
        .map_err(ApiError::context("Failed to add task"))?;
    info!(task_id = %task.id, "task created");
    Ok(Json(task))
}

/// PUT /tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let update =
        UpdateTask::try_from(body).map_err(ApiError::context("Failed to update task"))?;
    let column = update.column();
    let task = state
        .repo
        .update(id, update)
        .await
        .map_err(ApiError::context("Failed to update task"))?;
    info!(task_id = %id, column, "task updated");
    Ok(Json(task))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state
        .repo
        .delete(id)
        .await
        .map_err(ApiError::context("Failed to delete task"))?;
    info!(task_id = %id, "task deleted");
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}
