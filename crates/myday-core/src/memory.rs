use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::errors::TaskError;
use crate::ids::TaskId;
use crate::repository::TaskRepository;
use crate::tasks::{NewTask, Task, UpdateTask};

/// In-process task repository. Ids are never reused, matching the SQLite
/// store's AUTOINCREMENT behavior.
pub struct InMemoryTaskRepo {
    state: Mutex<State>,
}

struct State {
    last_id: i64,
    tasks: BTreeMap<TaskId, Task>,
    unavailable: bool,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                last_id: 0,
                tasks: BTreeMap::new(),
                unavailable: false,
            }),
        }
    }

    /// A repository whose every call fails with `StoreUnavailable`.
    pub fn unavailable() -> Self {
        let repo = Self::new();
        repo.set_unavailable(true);
        repo
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }
}

impl Default for InMemoryTaskRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn check(&self) -> Result<(), TaskError> {
        if self.unavailable {
            return Err(TaskError::StoreUnavailable("in-memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepo {
    async fn list(&self) -> Result<Vec<Task>, TaskError> {
        let state = self.state.lock();
        state.check()?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn create(&self, input: NewTask) -> Result<Task, TaskError> {
        let mut state = self.state.lock();
        state.check()?;
        state.last_id += 1;
        let task = Task {
            id: TaskId::new(state.last_id),
            title: input.title,
            is_completed: false,
            created_at: Utc::now(),
        };
        let _ = state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, update: UpdateTask) -> Result<Task, TaskError> {
        let mut state = self.state.lock();
        state.check()?;
        let task = state.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        match update {
            UpdateTask::Title { title } => task.title = title,
            UpdateTask::Status { completed } => task.is_completed = completed,
        }
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        let mut state = self.state.lock();
        state.check()?;
        let _ = state.tasks.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), TaskError> {
        self.state.lock().check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = InMemoryTaskRepo::new();
        let a = repo.create(NewTask::new("a")).await.unwrap();
        let b = repo.create(NewTask::new("b")).await.unwrap();
        assert!(b.id > a.id);
        assert!(!a.is_completed);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryTaskRepo::new();
        let a = repo.create(NewTask::new("a")).await.unwrap();
        repo.delete(a.id).await.unwrap();
        let b = repo.create(NewTask::new("b")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let repo = InMemoryTaskRepo::new();
        for title in ["c", "a", "b"] {
            repo.create(NewTask::new(title)).await.unwrap();
        }
        let ids: Vec<_> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn update_touches_one_column() {
        let repo = InMemoryTaskRepo::new();
        let t = repo.create(NewTask::new("Buy milk")).await.unwrap();

        let done = repo.update(t.id, UpdateTask::status(true)).await.unwrap();
        assert!(done.is_completed);
        assert_eq!(done.title, "Buy milk");

        let renamed = repo.update(t.id, UpdateTask::title("Buy oat milk")).await.unwrap();
        assert_eq!(renamed.title, "Buy oat milk");
        assert!(renamed.is_completed);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = InMemoryTaskRepo::new();
        let err = repo
            .update(TaskId::new(99), UpdateTask::status(true))
            .await
            .unwrap_err();
        assert_eq!(err, TaskError::NotFound(TaskId::new(99)));
    }

    #[tokio::test]
    async fn delete_twice_is_ok() {
        let repo = InMemoryTaskRepo::new();
        let t = repo.create(NewTask::new("x")).await.unwrap();
        let keep = repo.create(NewTask::new("keep")).await.unwrap();
        repo.delete(t.id).await.unwrap();
        repo.delete(t.id).await.unwrap();
        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, keep.id);
    }

    #[tokio::test]
    async fn unavailable_fails_every_call() {
        let repo = InMemoryTaskRepo::unavailable();
        assert!(matches!(repo.list().await, Err(TaskError::StoreUnavailable(_))));
        assert!(matches!(
            repo.create(NewTask::new("x")).await,
            Err(TaskError::StoreUnavailable(_))
        ));
        assert!(repo.ping().await.is_err());

        repo.set_unavailable(false);
        assert!(repo.ping().await.is_ok());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
