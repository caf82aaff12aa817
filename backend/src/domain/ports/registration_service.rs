//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Registration, RegistrationError, User};

/// Domain use-case port for registering new accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account, failing if the email is already taken.
    async fn register(&self, registration: &Registration) -> Result<User, RegistrationError>;
}
