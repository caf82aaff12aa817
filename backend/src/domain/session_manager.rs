//! Session manager: issues, resolves and destroys opaque session tokens.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, warn};

use crate::domain::ports::{SessionPersistenceError, SessionRepository, SessionService};
use crate::domain::{SessionError, SessionPolicy, SessionRecord, SessionToken, UserId};

fn map_store_error(error: SessionPersistenceError) -> SessionError {
    if error.is_unavailable() {
        error!(error = %error, "session store unreachable");
        SessionError::StorageUnavailable {
            message: error.detail(),
        }
    } else {
        error!(error = %error, "session store query failed");
        SessionError::Internal {
            message: error.detail(),
        }
    }
}

/// Session service backed by a [`SessionRepository`].
///
/// Tokens are drawn from the OS CSPRNG and only their digest is persisted.
/// Expiry is absolute from creation, measured with the injected [`Clock`].
/// Each `create` sweeps expired records from the store, and an expired
/// record that is resolved before the next sweep is removed on the spot.
pub struct SessionManager<R> {
    store: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
}

impl<R> SessionManager<R> {
    /// Create a session manager.
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use accounts::domain::{SessionManager, SessionPolicy};
    /// # use accounts::outbound::memory::InMemorySessionRepository;
    /// # use mockable::DefaultClock;
    /// let manager = SessionManager::new(
    ///     Arc::new(InMemorySessionRepository::default()),
    ///     Arc::new(DefaultClock),
    ///     SessionPolicy::default(),
    /// );
    /// # let _ = manager;
    /// ```
    pub fn new(store: Arc<R>, clock: Arc<dyn Clock>, policy: SessionPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }
}

#[async_trait]
impl<R> SessionService for SessionManager<R>
where
    R: SessionRepository,
{
    async fn create(&self, user_id: &UserId) -> Result<SessionToken, SessionError> {
        let created_at = self.clock.utc();
        match self.store.purge_expired(created_at).await {
            Ok(0) => {}
            Ok(purged) => debug!(purged, "expired sessions swept"),
            Err(err) => warn!(error = %err, "expired session sweep failed"),
        }

        let token = SessionToken::generate();
        let record = SessionRecord::new(
            token.digest(),
            user_id.clone(),
            created_at,
            self.policy.expires_at(created_at),
        );

        self.store.insert(&record).await.map_err(map_store_error)?;
        debug!(user_id = %user_id, expires_at = %record.expires_at(), "session created");
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<UserId>, SessionError> {
        let Ok(token) = SessionToken::parse(token) else {
            return Ok(None);
        };
        let digest = token.digest();

        let Some(record) = self.store.find(&digest).await.map_err(map_store_error)? else {
            return Ok(None);
        };

        if record.is_expired_at(self.clock.utc()) {
            self.store.delete(&digest).await.map_err(map_store_error)?;
            debug!(user_id = %record.user_id(), "expired session purged");
            return Ok(None);
        }

        Ok(Some(record.user_id().clone()))
    }

    async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        let Ok(token) = SessionToken::parse(token) else {
            return Ok(());
        };
        self.store
            .delete(&token.digest())
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "session_manager_tests.rs"]
mod tests;
