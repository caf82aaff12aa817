//! User accounts service: registration, login and cookie sessions.
//!
//! The crate follows a hexagonal layout:
//! - [`domain`]: account types, the credential service and session manager,
//!   and the ports they depend on.
//! - [`inbound`]: the actix-web adapter exposing those services over HTTP.
//! - [`outbound`]: user and session stores (in-memory and PostgreSQL) and the
//!   bcrypt password hasher.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
