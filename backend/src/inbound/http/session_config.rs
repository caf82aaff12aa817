//! Session cookie settings.
//!
//! The cookie carries nothing but the opaque session token, encrypted with a
//! key derived from a file on disk. Release builds insist on every setting
//! being present and sane; debug builds log what they ignore.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

pub mod fingerprint;
mod toggles;

use toggles::{CookieToggle, read_same_site};

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";

/// Read access to the variables that shape the session cookie.
///
/// Implemented for every [`mockable::Env`], so production code passes
/// `DefaultEnv` and tests pass `MockEnv`.
pub trait SessionEnv {
    fn string(&self, name: &str) -> Option<String>;
}

impl<E: Env> SessionEnv for E {
    fn string(&self, name: &str) -> Option<String> {
        Env::string(self, name)
    }
}

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use accounts::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Debug builds log `error` and carry on with `fallback`; release builds
    /// return it.
    fn tolerate<T>(self, fallback: T, error: SessionConfigError) -> Result<T, SessionConfigError> {
        match self {
            Self::Debug => {
                warn!(%error, "ignoring session setting in debug build");
                Ok(fallback)
            }
            Self::Release => Err(error),
        }
    }
}

/// Cookie settings derived from configuration toggles.
pub struct SessionSettings {
    /// Encryption key for cookie content.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("{name} must be set")]
    MissingEnv { name: &'static str },
    #[error("{name} has unrecognised value {value:?} (accepted: {expected})")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("cannot read session key file {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key file {path} holds {length} bytes; at least {min_len} are required")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SameSite=None cookies must also be Secure")]
    InsecureSameSiteNone,
    #[error("release builds need a persistent session key file")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// Release builds require every toggle and a key file of at least 64 bytes.
/// Debug builds fall back to secure defaults and an ephemeral key.
///
/// # Examples
///
/// ```rust
/// use accounts::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("accounts_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let key_path = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// let path_for_env = key_path.clone();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(path_for_env.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: SessionEnv>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = CookieToggle::Secure.read(env, mode)?;
    let same_site = read_same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = CookieToggle::AllowEphemeral.read(env, mode)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }

    Ok(SessionSettings {
        key: load_key(env, mode, allow_ephemeral)?,
        cookie_secure,
        same_site,
    })
}

/// Derive the cookie key from the key file.
///
/// An unreadable file yields a generated key in debug builds or when
/// ephemeral keys are allowed. A short file is fatal in release builds and
/// replaced by a generated key otherwise, since derivation needs at least
/// 32 bytes.
fn load_key<E: SessionEnv>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = env
        .string(KEY_FILE_ENV)
        .map_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH), PathBuf::from);

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "session key unreadable; generating a throwaway key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    let key = if length >= SESSION_KEY_MIN_LEN {
        Ok(Key::derive_from(&bytes))
    } else {
        mode.tolerate(
            Key::generate(),
            SessionConfigError::KeyTooShort {
                path,
                length,
                min_len: SESSION_KEY_MIN_LEN,
            },
        )
    };
    bytes.zeroize();
    key
}

#[cfg(test)]
mod test_utils;
