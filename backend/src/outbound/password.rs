//! bcrypt-backed [`PasswordHasher`] adapter.
//!
//! bcrypt is deliberately slow, so both operations run on Tokio's blocking
//! pool. The caller's [`TraceId`] is carried across so log lines emitted
//! there still correlate with the request.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, TraceId};

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Lowest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest work factor bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Password hasher using salted bcrypt.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given cost, clamped to the range bcrypt
    /// accepts.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

async fn run_blocking<F, T>(work: F) -> Result<T, PasswordHashError>
where
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || TraceId::sync_scope(trace_id, work))
        .await
        .map_err(|err| PasswordHashError::hashing(format!("hashing task failed: {err}")))?
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        run_blocking(move || {
            let encoded = bcrypt::hash(password.as_bytes(), cost)
                .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
            debug!(cost, "password hashed");
            Ok(PasswordHash::new(encoded))
        })
        .await
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        run_blocking(move || {
            bcrypt::verify(password.as_bytes(), &encoded).map_err(|err| match err {
                bcrypt::BcryptError::InvalidHash(_)
                | bcrypt::BcryptError::InvalidPrefix(_)
                | bcrypt::BcryptError::InvalidCost(_)
                | bcrypt::BcryptError::InvalidBase64(_) => {
                    PasswordHashError::malformed_hash(err.to_string())
                }
                other => PasswordHashError::hashing(other.to_string()),
            })
        })
        .await
    }
}
