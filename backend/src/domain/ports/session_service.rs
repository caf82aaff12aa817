//! Driving port for the session lifecycle.

use async_trait::async_trait;

use crate::domain::{SessionError, SessionToken, UserId};

/// Issues, resolves and destroys opaque session tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Open a session bound to `user_id`.
    async fn create(&self, user_id: &UserId) -> Result<SessionToken, SessionError>;

    /// Return the user bound to `token`, or `None` when the token is
    /// malformed, unknown or expired.
    async fn resolve(&self, token: &str) -> Result<Option<UserId>, SessionError>;

    /// End the session for `token`. Unknown tokens are a no-op.
    async fn destroy(&self, token: &str) -> Result<(), SessionError>;
}
