//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.
//!
//! Every statement filters on `user_id` as well as `id`, so a foreign task
//! is never read, changed or deleted.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{DUE_DATE_FORMAT, Task, TaskDraft, TaskId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{TaskChangeset, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    map_basic_pool_error(error, TaskPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TaskPersistenceError {
    map_basic_diesel_error(
        error,
        TaskPersistenceError::query,
        TaskPersistenceError::connection,
    )
}

/// Rebuild a domain task, re-validating stored text.
fn row_to_task(row: TaskRow) -> Result<Task, TaskPersistenceError> {
    let TaskRow {
        id,
        user_id,
        title,
        description,
        due_date,
        created_on,
        completed,
    } = row;
    let draft = TaskDraft::try_from_parts(
        &title,
        &description,
        &due_date.format(DUE_DATE_FORMAT).to_string(),
    )
    .map_err(|err| TaskPersistenceError::query(format!("corrupt task row {id}: {err}")))?;
    Ok(Task::restore(
        TaskId::from_uuid(id),
        UserId::from_uuid(user_id),
        draft,
        created_on,
        completed,
    ))
}

fn task_to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: *task.id().as_uuid(),
        user_id: *task.owner().as_uuid(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        due_date: task.due_date(),
        created_on: task.created_on(),
        completed: task.is_completed(),
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(tasks::table)
            .values(&task_to_row(task))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_for(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::user_id.eq(owner.as_uuid()))
            .order(tasks::created_on.desc())
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_task).collect()
    }

    async fn find(
        &self,
        owner: &UserId,
        id: TaskId,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = tasks::table
            .filter(tasks::id.eq(id.as_uuid()))
            .filter(tasks::user_id.eq(owner.as_uuid()))
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_task).transpose()
    }

    async fn save(&self, task: &Task) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = TaskChangeset {
            title: task.title(),
            description: task.description(),
            due_date: task.due_date(),
            completed: task.is_completed(),
        };
        let updated = diesel::update(
            tasks::table
                .filter(tasks::id.eq(task.id().as_uuid()))
                .filter(tasks::user_id.eq(task.owner().as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: TaskId,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::delete(
            tasks::table
                .filter(tasks::id.eq(id.as_uuid()))
                .filter(tasks::user_id.eq(owner.as_uuid())),
        )
        .returning(TaskRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_task).transpose()
    }
}
