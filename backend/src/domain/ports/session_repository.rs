//! Port for server-side session records keyed by token digest.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{SessionDigest, SessionRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionPersistenceError {
        /// Repository connection could not be established.
        Connection(message) => "session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query(message) => "session repository query failed: {message}",
    }
    unavailable = [Connection];
}

/// Storage for active sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly issued session.
    async fn insert(&self, record: &SessionRecord) -> Result<(), SessionPersistenceError>;

    /// Look up a session by token digest.
    async fn find(
        &self,
        digest: &SessionDigest,
    ) -> Result<Option<SessionRecord>, SessionPersistenceError>;

    /// Remove a session. Removing an absent digest succeeds.
    async fn delete(&self, digest: &SessionDigest) -> Result<(), SessionPersistenceError>;

    /// Remove every session whose expiry is at or before `now`, returning
    /// how many were dropped.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionPersistenceError>;
}
