//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed account entities and the use-cases that
//! operate on them, free of HTTP and database concerns. Keep types immutable
//! and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport error payload.
//! - `User`, `UserId`, `EmailAddress`, `PersonName`, `PasswordHash`.
//! - `Registration`, `LoginCredentials`: validated request inputs.
//! - `SessionToken`, `SessionRecord`, `SessionPolicy`: session state.
//! - `Task`, `TaskId`, `TaskDraft`: to-do items owned by a user.
//! - `CredentialService`, `SessionManager`, `TaskService`: driving port
//!   implementations.

pub mod accounts;
pub mod auth;
pub mod credential_service;
pub mod error;
pub mod ports;
pub mod session;
pub mod session_manager;
pub mod task;
pub mod task_service;
pub mod trace_id;
pub mod user;

pub use self::accounts::{AuthError, INVALID_CREDENTIALS_MESSAGE, RegistrationError, SessionError};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX_BYTES, Registration,
    RegistrationValidationError,
};
pub use self::credential_service::CredentialService;
pub use self::error::{Error, ErrorCode};
pub use self::session::{
    DEFAULT_SESSION_TTL_MINUTES, SessionDigest, SessionPolicy, SessionRecord, SessionToken,
    SessionTokenFormatError,
};
pub use self::session_manager::SessionManager;
pub use self::task::{
    DUE_DATE_FORMAT, TASK_DESCRIPTION_MAX, TASK_TITLE_MAX, Task, TaskDraft, TaskError, TaskId,
    TaskValidationError,
};
pub use self::task_service::TaskService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, PERSON_NAME_MAX, PasswordHash, PersonName, User, UserId,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use accounts::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
