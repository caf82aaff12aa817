//! Port abstraction for task persistence adapters and their errors.
//!
//! Every lookup is scoped by owner. A task owned by someone else is
//! indistinguishable from one that was never stored.
use async_trait::async_trait;

use crate::domain::{Task, TaskId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection(message) => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query(message) => "task repository query failed: {message}",
    }
    unavailable = [Connection];
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError>;

    /// All of `owner`'s tasks, newest first.
    async fn list_for(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError>;

    async fn find(&self, owner: &UserId, id: TaskId)
    -> Result<Option<Task>, TaskPersistenceError>;

    /// Overwrite the stored copy of `task`. Returns `false` when no task
    /// with that id and owner exists any more.
    async fn save(&self, task: &Task) -> Result<bool, TaskPersistenceError>;

    /// Remove and return the task, if `owner` has one with this id.
    async fn delete(&self, owner: &UserId, id: TaskId)
    -> Result<Option<Task>, TaskPersistenceError>;
}
