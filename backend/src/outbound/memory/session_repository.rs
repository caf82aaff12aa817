//! In-memory `SessionRepository` adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{SessionPersistenceError, SessionRepository};
use crate::domain::{SessionDigest, SessionRecord};

fn poisoned() -> SessionPersistenceError {
    SessionPersistenceError::query("session map lock poisoned")
}

/// Session store held in process memory.
#[derive(Default)]
pub struct InMemorySessionRepository {
    records: RwLock<HashMap<SessionDigest, SessionRecord>>,
}

impl InMemorySessionRepository {
    /// Number of stored sessions, expired or not.
    pub fn len(&self) -> usize {
        self.records.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, record: &SessionRecord) -> Result<(), SessionPersistenceError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(record.digest().clone(), record.clone());
        Ok(())
    }

    async fn find(
        &self,
        digest: &SessionDigest,
    ) -> Result<Option<SessionRecord>, SessionPersistenceError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(digest).cloned())
    }

    async fn delete(&self, digest: &SessionDigest) -> Result<(), SessionPersistenceError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.remove(digest);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionPersistenceError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        Ok(before - records.len())
    }
}
