//! Driving port for a user's to-do list.

use async_trait::async_trait;

use crate::domain::{Task, TaskDraft, TaskError, TaskId, UserId};

/// Task use-cases, always on behalf of a signed-in owner.
///
/// Ids that do not belong to `owner` yield [`TaskError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskBoard: Send + Sync {
    /// Owner's tasks, most recently created first.
    async fn list(&self, owner: &UserId) -> Result<Vec<Task>, TaskError>;

    async fn create(&self, owner: &UserId, draft: TaskDraft) -> Result<Task, TaskError>;

    /// Mark a task done or not done and return its new state.
    async fn set_completed(
        &self,
        owner: &UserId,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, TaskError>;

    async fn update(&self, owner: &UserId, id: TaskId, draft: TaskDraft)
    -> Result<Task, TaskError>;

    /// Delete a task and return what was removed.
    async fn delete(&self, owner: &UserId, id: TaskId) -> Result<Task, TaskError>;
}
