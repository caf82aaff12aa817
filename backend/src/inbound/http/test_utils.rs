//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::inbound::http::state::HttpState;
use crate::test_support::AccountStack;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state wired to an in-memory account stack.
pub fn stack_state(stack: &AccountStack) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        stack.registration(),
        stack.login(),
        stack.session_service(),
        stack.profiles(),
        stack.task_board(),
    ))
}
