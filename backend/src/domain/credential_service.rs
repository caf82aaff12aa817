//! Credential service: account creation and credential verification.
//!
//! Implements the [`RegistrationService`], [`LoginService`] and
//! [`UserProfileQuery`] driving ports on top of the user store, a password
//! hasher and the session service.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, SessionService,
    UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{
    AuthError, EmailAddress, Error, LoginCredentials, PasswordHash, Registration,
    RegistrationError, SessionToken, User, UserId,
};

/// Plaintext hashed once to give unknown-email logins something to verify
/// against, so they cost the same as a wrong password.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

fn map_registration_store_error(error: UserPersistenceError) -> RegistrationError {
    if error == UserPersistenceError::DuplicateEmail {
        return RegistrationError::DuplicateEmail;
    }
    if error.is_unavailable() {
        error!(error = %error, "user store unreachable during registration");
        return RegistrationError::StorageUnavailable {
            message: error.detail(),
        };
    }
    error!(error = %error, "user store rejected registration");
    RegistrationError::Internal {
        message: error.to_string(),
    }
}

fn map_login_store_error(error: UserPersistenceError) -> AuthError {
    if error.is_unavailable() {
        error!(error = %error, "user store unreachable during login");
        AuthError::StorageUnavailable {
            message: error.detail(),
        }
    } else {
        error!(error = %error, "user lookup failed during login");
        AuthError::Internal {
            message: error.to_string(),
        }
    }
}

fn map_login_hash_error(error: PasswordHashError) -> AuthError {
    error!(error = %error, "password verification failed to run");
    AuthError::Internal {
        message: error.to_string(),
    }
}

/// Credential service implementing the account driving ports.
pub struct CredentialService<U, H, S> {
    users: Arc<U>,
    hasher: Arc<H>,
    sessions: Arc<S>,
    dummy_hash: OnceCell<PasswordHash>,
}

impl<U, H, S> CredentialService<U, H, S> {
    /// Create a credential service over a user store, hasher and session
    /// service.
    pub fn new(users: Arc<U>, hasher: Arc<H>, sessions: Arc<S>) -> Self {
        Self {
            users,
            hasher,
            sessions,
            dummy_hash: OnceCell::new(),
        }
    }
}

impl<U, H, S> CredentialService<U, H, S>
where
    H: PasswordHasher,
{
    async fn dummy_hash(&self) -> Result<&PasswordHash, PasswordHashError> {
        self.dummy_hash
            .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
            .await
    }

    /// Burn one verification so unknown accounts cost as much as known ones.
    async fn verify_against_dummy(&self, password: &str) {
        let outcome = match self.dummy_hash().await {
            Ok(hash) => self.hasher.verify(password, hash).await,
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            debug!(error = %err, "dummy verification failed");
        }
    }
}

#[async_trait]
impl<U, H, S> RegistrationService for CredentialService<U, H, S>
where
    U: UserRepository,
    H: PasswordHasher,
    S: SessionService,
{
    async fn register(&self, registration: &Registration) -> Result<User, RegistrationError> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(|err| {
                error!(error = %err, "password hashing failed during registration");
                RegistrationError::Internal {
                    message: err.to_string(),
                }
            })?;

        let user = User::new(
            UserId::random(),
            registration.email().clone(),
            registration.first_name().clone(),
            registration.last_name().clone(),
            password_hash,
        );

        self.users
            .insert(&user)
            .await
            .map_err(map_registration_store_error)?;

        info!(user_id = %user.id(), "account registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H, S> LoginService for CredentialService<U, H, S>
where
    U: UserRepository,
    H: PasswordHasher,
    S: SessionService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, AuthError> {
        // An address that fails validation can never have registered.
        let found = match EmailAddress::new(credentials.email()) {
            Ok(email) => self
                .users
                .find_by_email(&email)
                .await
                .map_err(map_login_store_error)?,
            Err(_) => None,
        };

        let Some(user) = found else {
            self.verify_against_dummy(credentials.password()).await;
            warn!("login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_login_hash_error)?;
        if !verified {
            warn!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.sessions.create(user.id()).await?;
        info!(user_id = %user.id(), "login succeeded");
        Ok(token)
    }
}

#[async_trait]
impl<U, H, S> UserProfileQuery for CredentialService<U, H, S>
where
    U: UserRepository,
    H: PasswordHasher,
    S: SessionService,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(user_id).await.map_err(|err| {
            if err.is_unavailable() {
                error!(error = %err, "user store unreachable during profile lookup");
                Error::service_unavailable(format!("user store unavailable: {}", err.detail()))
            } else {
                error!(error = %err, "profile lookup failed");
                Error::internal(err.to_string())
            }
        })
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
