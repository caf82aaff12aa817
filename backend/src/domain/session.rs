//! Session tokens and the server-side records they map to.
//!
//! A [`SessionToken`] is the only thing a client ever holds. The server keeps
//! a [`SessionRecord`] keyed by the token's SHA-256 [`SessionDigest`], so a
//! leaked session table does not yield usable tokens.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use super::UserId;

/// Random bytes drawn per token.
pub const SESSION_TOKEN_BYTES: usize = 32;
const SESSION_TOKEN_HEX_LEN: usize = SESSION_TOKEN_BYTES * 2;

/// Default absolute session lifetime.
pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 120;

/// Error raised when a client-supplied token is not well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session token must be 64 lowercase hex characters")]
pub struct SessionTokenFormatError;

/// Opaque bearer token identifying an active session.
///
/// # Examples
/// ```
/// use accounts::domain::SessionToken;
///
/// let token = SessionToken::generate();
/// let parsed = SessionToken::parse(token.expose()).unwrap();
/// assert_eq!(token.digest(), parsed.digest());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Draw a fresh token from the operating system CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SESSION_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = Self(Zeroizing::new(hex::encode(bytes)));
        bytes.zeroize();
        token
    }

    /// Accept a token presented by a client.
    pub fn parse(raw: &str) -> Result<Self, SessionTokenFormatError> {
        let well_formed = raw.len() == SESSION_TOKEN_HEX_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(SessionTokenFormatError);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Token text to hand to the client.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Storage key for this token.
    pub fn digest(&self) -> SessionDigest {
        SessionDigest(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Hex-encoded SHA-256 digest of a [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionDigest(String);

impl SessionDigest {
    /// Wrap a digest read back from storage.
    pub fn from_stored(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-side state of an active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    digest: SessionDigest,
    user_id: UserId,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Assemble a record. `expires_at` is taken as given; callers derive it
    /// from a [`SessionPolicy`] or read it back from storage.
    pub fn new(
        digest: SessionDigest,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            digest,
            user_id,
            created_at,
            expires_at,
        }
    }

    /// Store key. The token itself is never kept.
    pub fn digest(&self) -> &SessionDigest {
        &self.digest
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A session is dead from `expires_at` onwards.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Expiry rule applied to new sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    ttl: Duration,
}

impl SessionPolicy {
    /// Absolute lifetime in minutes; zero is raised to one minute.
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            ttl: Duration::minutes(i64::from(minutes.max(1))),
        }
    }

    /// Lifetime of every session issued under this policy.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Expiry instant for a session created at `created_at`.
    pub fn expires_at(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + self.ttl
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_SESSION_TTL_MINUTES)
    }
}
