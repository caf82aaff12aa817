//! Error taxonomy for the account use-cases.
//!
//! Each driving port reports a typed error so callers can branch on the
//! failure kind. Inbound adapters convert them into the transport
//! [`Error`] through the `From` impls below.

use serde_json::json;

use super::{Error, RegistrationValidationError};

/// Message shared by every failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";

/// Failures raised by [`RegistrationService::register`](crate::domain::ports::RegistrationService::register).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// A field was missing, blank or malformed.
    #[error("{0}")]
    Validation(#[from] RegistrationValidationError),
    /// The email already belongs to an account.
    #[error("email already registered")]
    DuplicateEmail,
    /// The user store could not be reached.
    #[error("user store unavailable: {message}")]
    StorageUnavailable { message: String },
    /// Any other store or hashing fault.
    #[error("registration failed: {message}")]
    Internal { message: String },
}

/// Failures raised by [`LoginService::login`](crate::domain::ports::LoginService::login).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password. The two are never distinguished.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The user or session store could not be reached.
    #[error("credential store unavailable: {message}")]
    StorageUnavailable { message: String },
    /// Any other store or hashing fault.
    #[error("login failed: {message}")]
    Internal { message: String },
}

/// Failures raised by the [`SessionService`](crate::domain::ports::SessionService).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session store unavailable: {message}")]
    StorageUnavailable { message: String },
    #[error("session store failed: {message}")]
    Internal { message: String },
}

impl From<SessionError> for AuthError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::StorageUnavailable { message } => Self::StorageUnavailable { message },
            SessionError::Internal { message } => Self::Internal { message },
        }
    }
}

impl From<RegistrationError> for Error {
    fn from(value: RegistrationError) -> Self {
        match value {
            RegistrationError::Validation(err) => Error::invalid_request(err.to_string())
                .with_details(json!({ "field": err.field() })),
            RegistrationError::DuplicateEmail => Error::conflict("email already registered"),
            RegistrationError::StorageUnavailable { message } => {
                Error::service_unavailable(format!("user store unavailable: {message}"))
            }
            RegistrationError::Internal { message } => Error::internal(message),
        }
    }
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidCredentials => Error::unauthorized(INVALID_CREDENTIALS_MESSAGE),
            AuthError::StorageUnavailable { message } => {
                Error::service_unavailable(format!("credential store unavailable: {message}"))
            }
            AuthError::Internal { message } => Error::internal(message),
        }
    }
}

impl From<SessionError> for Error {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::StorageUnavailable { message } => {
                Error::service_unavailable(format!("session store unavailable: {message}"))
            }
            SessionError::Internal { message } => Error::internal(message),
        }
    }
}
