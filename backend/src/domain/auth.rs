//! Authentication primitives: registration input and login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, PersonName, UserValidationError};

/// Longest password accepted, in bytes. bcrypt ignores input past this point.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Email was blank, too long or malformed.
    Email(UserValidationError),
    /// First name was blank or too long.
    FirstName(UserValidationError),
    /// Last name was blank or too long.
    LastName(UserValidationError),
    /// Password was blank once trimmed.
    EmptyPassword,
    /// Password exceeds the hashing input limit.
    PasswordTooLong { max_bytes: usize },
}

impl RegistrationValidationError {
    /// Name of the offending request field, as clients spell it.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::FirstName(_) => "firstName",
            Self::LastName(_) => "lastName",
            Self::EmptyPassword | Self::PasswordTooLong { .. } => "password",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => write!(f, "{err}"),
            Self::FirstName(err) => write!(f, "first {err}"),
            Self::LastName(err) => write!(f, "last {err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max_bytes } => {
                write!(f, "password must be at most {max_bytes} bytes")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated sign-up input.
///
/// ## Invariants
/// - `email` is canonical (see [`EmailAddress`]).
/// - names are trimmed and non-empty.
/// - `password` is non-blank and at most [`PASSWORD_MAX_BYTES`] bytes; it
///   keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use accounts::domain::Registration;
///
/// let reg = Registration::try_from_parts("a@x.io", " Ann ", "Lee", "pw1").unwrap();
/// assert_eq!(reg.first_name().as_ref(), "Ann");
/// assert_eq!(reg.password(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    first_name: PersonName,
    last_name: PersonName,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw form inputs.
    pub fn try_from_parts(
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email = EmailAddress::new(email).map_err(RegistrationValidationError::Email)?;
        let first_name =
            PersonName::new(first_name).map_err(RegistrationValidationError::FirstName)?;
        let last_name =
            PersonName::new(last_name).map_err(RegistrationValidationError::LastName)?;

        if password.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(RegistrationValidationError::PasswordTooLong {
                max_bytes: PASSWORD_MAX_BYTES,
            });
        }

        Ok(Self {
            email,
            first_name,
            last_name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Canonical address the account will be stored under.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Plaintext secret, to be hashed and then dropped.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and ASCII-lowercased and must not be empty. It is
///   not checked for shape: an address that could never have registered
///   simply fails to match any account.
/// - `password` is required to be non-blank but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use accounts::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ann@X.io", "pw1").unwrap();
/// assert_eq!(creds.email(), "ann@x.io");
/// assert_eq!(creds.password(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.trim().is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_ascii_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
