//! Process-local repositories.
//!
//! Used when the server starts without a database URL and by tests that want
//! real store semantics without PostgreSQL. State is lost on restart.

mod session_repository;
mod task_repository;
mod user_repository;

pub use session_repository::InMemorySessionRepository;
pub use task_repository::InMemoryTaskRepository;
pub use user_repository::InMemoryUserRepository;
