use async_trait::async_trait;
use rusqlite::{params, Connection};
use tracing::{debug, instrument};

use myday_core::{NewTask, Task, TaskError, TaskId, TaskRepository, UpdateTask};

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers;
use crate::schema::TASK_COLUMNS;

const TABLE: &str = "tasks";

fn task_from_row(row: &rusqlite::Row<'_>) -> Result<Task, StoreError> {
    let created_at: String = row_helpers::get(row, 3, TABLE, "created_at")?;
    Ok(Task {
        id: TaskId::new(row_helpers::get(row, 0, TABLE, "id")?),
        title: row_helpers::get(row, 1, TABLE, "title")?,
        is_completed: row_helpers::get(row, 2, TABLE, "isCompleted")?,
        created_at: row_helpers::parse_timestamp(&created_at, TABLE, "created_at")?,
    })
}

/// `SELECT` every task, ascending by id.
pub fn select_all(conn: &Connection) -> Result<Vec<Task>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id ASC"))?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(task_from_row(row)?);
    }
    Ok(tasks)
}

/// `INSERT` a new, not-yet-completed task and return the stored row.
pub fn insert(conn: &Connection, input: &NewTask) -> Result<Task, StoreError> {
    let mut stmt = conn.prepare(&format!(
        r#"INSERT INTO tasks (title, "isCompleted") VALUES (?1, 0) RETURNING {TASK_COLUMNS}"#
    ))?;
    let mut rows = stmt.query(params![input.title])?;
    match rows.next()? {
        Some(row) => task_from_row(row),
        None => Err(StoreError::Database("insert returned no row".into())),
    }
}

/// `UPDATE` one column. `None` when no row has this id.
pub fn update_column(
    conn: &Connection,
    id: TaskId,
    update: &UpdateTask,
) -> Result<Option<Task>, StoreError> {
    let mut stmt;
    let mut rows = match update {
        UpdateTask::Title { title } => {
            stmt = conn.prepare(&format!(
                "UPDATE tasks SET title = ?1 WHERE id = ?2 RETURNING {TASK_COLUMNS}"
            ))?;
            stmt.query(params![title, id.get()])?
        }
        UpdateTask::Status { completed } => {
            stmt = conn.prepare(&format!(
                r#"UPDATE tasks SET "isCompleted" = ?1 WHERE id = ?2 RETURNING {TASK_COLUMNS}"#
            ))?;
            stmt.query(params![completed, id.get()])?
        }
    };
    match rows.next()? {
        Some(row) => task_from_row(row).map(Some),
        None => Ok(None),
    }
}

/// `DELETE` by id, returning the number of rows removed (0 or 1).
pub fn delete_by_id(conn: &Connection, id: TaskId) -> Result<usize, StoreError> {
    Ok(conn.execute("DELETE FROM tasks WHERE id = ?1", params![id.get()])?)
}

/// SQLite-backed [`TaskRepository`]. Each call runs one statement on the
/// blocking pool and releases the connection before returning.
#[derive(Clone)]
pub struct SqliteTaskRepo {
    db: Database,
}

impl SqliteTaskRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }

    async fn run<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.with_conn(f)).await?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepo {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Task>, TaskError> {
        let tasks = self.run(select_all).await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: NewTask) -> Result<Task, TaskError> {
        let task = self.run(move |conn| insert(conn, &input)).await?;
        debug!(task_id = %task.id, "task created");
        Ok(task)
    }

    #[instrument(skip(self, change), fields(task_id = %id, column = change.column()))]
    async fn update(&self, id: TaskId, change: UpdateTask) -> Result<Task, TaskError> {
        self.run(move |conn| update_column(conn, id, &change))
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        let removed = self.run(move |conn| delete_by_id(conn, id)).await?;
        debug!(removed, "delete executed");
        Ok(())
    }

    async fn ping(&self) -> Result<(), TaskError> {
        self.run(|conn| {
            let _: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
            Ok(())
        })
        .await?;
        Ok(())
    }
}
