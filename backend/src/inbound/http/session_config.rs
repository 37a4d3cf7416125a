//! Session cookie configuration and validation.
//!
//! The raw toggles come from application settings; this module applies the
//! build-mode rules. Debug builds fall back to defaults with a warning,
//! release builds reject missing or invalid values.

/// Key fingerprints for startup logs.
pub mod fingerprint;
mod parsing;

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use self::parsing::{BoolSetting, parse_bool_setting, parse_same_site};

pub use self::fingerprint::key_fingerprint;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_SETTING: &str = "PERSONS_SESSION_COOKIE_SECURE";
const SAME_SITE_SETTING: &str = "PERSONS_SESSION_SAME_SITE";
const ALLOW_EPHEMERAL_SETTING: &str = "PERSONS_SESSION_ALLOW_EPHEMERAL";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates defaults and warns about missing toggles.
    Debug,
    /// Requires explicit, valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Unvalidated session toggles as read from configuration.
#[derive(Clone, Debug, Default)]
pub struct SessionToggles<'a> {
    /// Key file override.
    pub key_file: Option<&'a Path>,
    /// Raw boolean for the `Secure` cookie attribute.
    pub cookie_secure: Option<&'a str>,
    /// Raw `SameSite` policy.
    pub same_site: Option<&'a str>,
    /// Raw boolean permitting a generated key.
    pub allow_ephemeral: Option<&'a str>,
}

/// Validated session cookie settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether cookies carry `Secure`.
    pub cookie_secure: bool,
    /// Cookie `SameSite` policy.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required setting: {name}")]
    MissingSetting { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("PERSONS_SESSION_SAME_SITE=None requires PERSONS_SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("PERSONS_SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Validate session toggles for the given build mode.
///
/// # Examples
/// ```
/// use persons::inbound::http::session_config::{BuildMode, SessionToggles, session_settings};
///
/// let settings = session_settings(&SessionToggles::default(), BuildMode::Debug)
///     .expect("debug builds fall back to defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings(
    toggles: &SessionToggles<'_>,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = parse_bool_setting(
        toggles.cookie_secure,
        mode,
        BoolSetting::new(COOKIE_SECURE_SETTING, true),
        |flag, _| Ok(flag),
    )?;
    let same_site = parse_same_site(toggles.same_site, mode, cookie_secure)?;
    let allow_ephemeral = parse_bool_setting(
        toggles.allow_ephemeral,
        mode,
        BoolSetting::new(ALLOW_EPHEMERAL_SETTING, false),
        |flag, mode| {
            if flag && !mode.is_debug() {
                Err(SessionConfigError::EphemeralNotAllowed)
            } else {
                Ok(flag)
            }
        },
    )?;
    let key = session_key(toggles.key_file, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn session_key(
    key_file: Option<&Path>,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = key_file.map_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH), Path::to_path_buf);

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}
