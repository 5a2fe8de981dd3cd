use async_trait::async_trait;

use crate::errors::TaskError;
use crate::ids::TaskId;
use crate::tasks::{NewTask, Task, UpdateTask};

/// Persistence port for tasks. Every method maps onto one atomic statement.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// All tasks, ascending by id.
    async fn list(&self) -> Result<Vec<Task>, TaskError>;

    /// Insert with `is_completed = false` and return the stored row.
    async fn create(&self, input: NewTask) -> Result<Task, TaskError>;

    /// Apply a single-column update. `NotFound` if the id does not exist.
    async fn update(&self, id: TaskId, update: UpdateTask) -> Result<Task, TaskError>;

    /// Hard delete. Missing ids are not an error.
    async fn delete(&self, id: TaskId) -> Result<(), TaskError>;

    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<(), TaskError>;
}
