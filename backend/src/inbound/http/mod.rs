//! HTTP inbound adapter exposing the account and task endpoints.

pub mod accounts;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
