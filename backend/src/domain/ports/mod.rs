//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `SessionRepository`, `TaskRepository`,
//! `PasswordHasher`) are implemented by outbound adapters. Driving ports
//! (`RegistrationService`, `LoginService`, `SessionService`,
//! `UserProfileQuery`, `TaskBoard`) are implemented by domain services and
//! called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod registration_service;
mod session_repository;
mod session_service;
mod task_board;
mod task_repository;
mod user_profile_query;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionPersistenceError, SessionRepository};
#[cfg(test)]
pub use session_service::MockSessionService;
pub use session_service::SessionService;
#[cfg(test)]
pub use task_board::MockTaskBoard;
pub use task_board::TaskBoard;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskPersistenceError, TaskRepository};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
