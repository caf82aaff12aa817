//! In-memory `TaskRepository` adapter.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{Task, TaskId, UserId};

/// Task store held in process memory.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskRepository {
    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<TaskId, Task>>, TaskPersistenceError> {
        self.tasks
            .read()
            .map_err(|_| TaskPersistenceError::query("task map lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<TaskId, Task>>, TaskPersistenceError> {
        self.tasks
            .write()
            .map_err(|_| TaskPersistenceError::query("task map lock poisoned"))
    }

    /// Number of stored tasks across all owners.
    pub fn len(&self) -> usize {
        self.tasks.read().map(|tasks| tasks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        self.write()?.insert(task.id(), task.clone());
        Ok(())
    }

    async fn list_for(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut owned: Vec<Task> = self
            .read()?
            .values()
            .filter(|task| task.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|task| Reverse(task.created_on()));
        Ok(owned)
    }

    async fn find(
        &self,
        owner: &UserId,
        id: TaskId,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        Ok(self
            .read()?
            .get(&id)
            .filter(|task| task.owner() == owner)
            .cloned())
    }

    async fn save(&self, task: &Task) -> Result<bool, TaskPersistenceError> {
        let mut tasks = self.write()?;
        match tasks.get_mut(&task.id()) {
            Some(stored) if stored.owner() == task.owner() => {
                *stored = task.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: TaskId,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut tasks = self.write()?;
        if tasks.get(&id).is_some_and(|task| task.owner() == owner) {
            Ok(tasks.remove(&id))
        } else {
            Ok(None)
        }
    }
}
