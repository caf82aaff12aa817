//! Port abstraction for user persistence adapters and their errors.
//!
//! Adapters own the uniqueness constraints: `insert` must reject a duplicate
//! id or email atomically, never through a separate read-then-write check.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection(message) => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query(message) => "user repository query failed: {message}",
        /// Another user already holds this email.
        DuplicateEmail => "a user with this email already exists",
        /// Another user already holds this identifier.
        DuplicateId => "a user with this id already exists",
    }
    unavailable = [Connection];
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by canonical email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
