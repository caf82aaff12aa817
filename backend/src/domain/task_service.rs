//! Task service: the to-do list behind the [`TaskBoard`] port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{TaskBoard, TaskPersistenceError, TaskRepository};
use crate::domain::{Task, TaskDraft, TaskError, TaskId, UserId};

fn map_store_error(error: TaskPersistenceError) -> TaskError {
    if error.is_unavailable() {
        error!(error = %error, "task store unreachable");
        TaskError::StorageUnavailable {
            message: error.detail(),
        }
    } else {
        error!(error = %error, "task store query failed");
        TaskError::Internal {
            message: error.detail(),
        }
    }
}

/// [`TaskBoard`] over a [`TaskRepository`], stamping creation times from the
/// injected [`Clock`].
pub struct TaskService<R> {
    tasks: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TaskService<R> {
    pub fn new(tasks: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { tasks, clock }
    }
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    async fn owned(&self, owner: &UserId, id: TaskId) -> Result<Task, TaskError> {
        self.tasks
            .find(owner, id)
            .await
            .map_err(map_store_error)?
            .ok_or(TaskError::NotFound)
    }

    async fn store(&self, task: Task) -> Result<Task, TaskError> {
        if self.tasks.save(&task).await.map_err(map_store_error)? {
            Ok(task)
        } else {
            Err(TaskError::NotFound)
        }
    }
}

#[async_trait]
impl<R> TaskBoard for TaskService<R>
where
    R: TaskRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<Task>, TaskError> {
        self.tasks.list_for(owner).await.map_err(map_store_error)
    }

    async fn create(&self, owner: &UserId, draft: TaskDraft) -> Result<Task, TaskError> {
        let task = Task::new(TaskId::random(), owner.clone(), draft, self.clock.utc());
        self.tasks.insert(&task).await.map_err(map_store_error)?;
        info!(task_id = %task.id(), user_id = %owner, "task created");
        Ok(task)
    }

    async fn set_completed(
        &self,
        owner: &UserId,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, TaskError> {
        let mut task = self.owned(owner, id).await?;
        task.set_completed(completed);
        self.store(task).await
    }

    async fn update(
        &self,
        owner: &UserId,
        id: TaskId,
        draft: TaskDraft,
    ) -> Result<Task, TaskError> {
        let mut task = self.owned(owner, id).await?;
        task.apply(draft);
        self.store(task).await
    }

    async fn delete(&self, owner: &UserId, id: TaskId) -> Result<Task, TaskError> {
        let removed = self
            .tasks
            .delete(owner, id)
            .await
            .map_err(map_store_error)?
            .ok_or(TaskError::NotFound)?;
        info!(task_id = %id, user_id = %owner, "task deleted");
        Ok(removed)
    }
}
