//! Driving port for user profile queries.
//!
//! Inbound adapters use this port to load the signed-in user's profile
//! without importing persistence details.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading a user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile for `user_id`, or `None` if the account is gone.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<User>, Error>;
}
