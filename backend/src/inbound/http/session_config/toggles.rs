//! Cookie toggles read from the environment.

use actix_web::cookie::SameSite;

use super::{
    ALLOW_EPHEMERAL_ENV, BuildMode, COOKIE_SECURE_ENV, SAMESITE_ENV, SessionConfigError,
    SessionEnv,
};

/// On/off switches that shape the session cookie.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum CookieToggle {
    /// Mark the cookie `Secure`. On unless switched off.
    Secure,
    /// Accept a generated key when the key file is unreadable.
    AllowEphemeral,
}

impl CookieToggle {
    const ACCEPTED: &'static str = "1|0|true|false|yes|no|on|off";

    const fn var(self) -> &'static str {
        match self {
            Self::Secure => COOKIE_SECURE_ENV,
            Self::AllowEphemeral => ALLOW_EPHEMERAL_ENV,
        }
    }

    const fn fallback(self) -> bool {
        matches!(self, Self::Secure)
    }

    /// Current value of the toggle. Debug builds fall back when the variable
    /// is absent or garbled; release builds refuse to start.
    pub(super) fn read<E: SessionEnv>(self, env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
        let name = self.var();
        let Some(raw) = env.string(name) else {
            return mode.tolerate(self.fallback(), SessionConfigError::MissingEnv { name });
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => mode.tolerate(
                self.fallback(),
                SessionConfigError::InvalidEnv {
                    name,
                    value: raw,
                    expected: Self::ACCEPTED,
                },
            ),
        }
    }
}

/// `SameSite` policy for the cookie. `None` is only honoured alongside a
/// secure cookie in release builds.
pub(super) fn read_same_site<E: SessionEnv>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let Some(raw) = env.string(SAMESITE_ENV) else {
        return mode.tolerate(SameSite::Lax, SessionConfigError::MissingEnv { name: SAMESITE_ENV });
    };
    let policy = match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => {
            return mode.tolerate(
                SameSite::Lax,
                SessionConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value: raw,
                    expected: "Strict|Lax|None",
                },
            );
        }
    };
    if policy == SameSite::None && !cookie_secure {
        return mode.tolerate(policy, SessionConfigError::InsecureSameSiteNone);
    }
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;
    use crate::inbound::http::session_config::test_utils::mock_env;

    #[rstest]
    #[case(CookieToggle::Secure, " ON ", true)]
    #[case(CookieToggle::Secure, "off", false)]
    #[case(CookieToggle::AllowEphemeral, "Yes", true)]
    #[case(CookieToggle::AllowEphemeral, "0", false)]
    fn toggles_accept_common_spellings(
        #[case] toggle: CookieToggle,
        #[case] raw: &str,
        #[case] expected: bool,
    ) {
        let env = mock_env(HashMap::from([(toggle.var(), raw.to_owned())]));
        let value = toggle.read(&env, BuildMode::Release).expect("valid toggle");
        assert_eq!(value, expected);
    }

    #[rstest]
    #[case(CookieToggle::Secure, true)]
    #[case(CookieToggle::AllowEphemeral, false)]
    fn debug_builds_fall_back_per_toggle(#[case] toggle: CookieToggle, #[case] expected: bool) {
        let env = mock_env(HashMap::from([(toggle.var(), "perhaps".to_owned())]));
        assert_eq!(toggle.read(&env, BuildMode::Debug).expect("fallback"), expected);
    }

    #[rstest]
    fn debug_builds_keep_insecure_same_site_none() {
        let env = mock_env(HashMap::from([(SAMESITE_ENV, "none".to_owned())]));
        let policy = read_same_site(&env, BuildMode::Debug, false).expect("tolerated");
        assert_eq!(policy, SameSite::None);
    }
}
