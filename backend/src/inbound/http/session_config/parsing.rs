//! Toggle parsing helpers for session configuration.

use actix_web::cookie::SameSite;
use tracing::warn;

use super::{BuildMode, COOKIE_SECURE_SETTING, SAME_SITE_SETTING, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAME_SITE_EXPECTED: &str = "Strict|Lax|None";

/// Name and debug-mode fallback of a boolean toggle.
pub(super) struct BoolSetting {
    name: &'static str,
    default_value: bool,
}

impl BoolSetting {
    pub(super) const fn new(name: &'static str, default_value: bool) -> Self {
        Self {
            name,
            default_value,
        }
    }
}

pub(super) fn parse_bool_setting<F>(
    raw: Option<&str>,
    mode: BuildMode,
    setting: BoolSetting,
    validate: F,
) -> Result<bool, SessionConfigError>
where
    F: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
{
    let BoolSetting {
        name,
        default_value,
    } = setting;
    match raw {
        Some(value) => match parse_bool(value) {
            Some(flag) => validate(flag, mode),
            None => debug_warn_or_error(
                mode,
                default_value,
                SessionConfigError::InvalidSetting {
                    name,
                    value: value.to_owned(),
                    expected: BOOL_EXPECTED,
                },
                || warn!(value, default_value, "invalid {name}; using default"),
            ),
        },
        None => debug_warn_or_error(
            mode,
            default_value,
            SessionConfigError::MissingSetting { name },
            || warn!(default_value, "{name} not set; using default"),
        ),
    }
}

pub(super) fn parse_same_site(
    raw: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = raw else {
        return debug_warn_or_error(
            mode,
            default_same_site,
            SessionConfigError::MissingSetting {
                name: SAME_SITE_SETTING,
            },
            || warn!("{SAME_SITE_SETTING} not set; using default"),
        );
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => {
            if !cookie_secure {
                debug_warn_or_error(mode, (), SessionConfigError::InsecureSameSiteNone, || {
                    warn!(
                        "{SAME_SITE_SETTING}=None with {COOKIE_SECURE_SETTING}=0; \
                         browsers may reject the cookie"
                    );
                })?;
            }
            Ok(SameSite::None)
        }
        _ => debug_warn_or_error(
            mode,
            default_same_site,
            SessionConfigError::InvalidSetting {
                name: SAME_SITE_SETTING,
                value: value.to_owned(),
                expected: SAME_SITE_EXPECTED,
            },
            || warn!(value, "invalid {SAME_SITE_SETTING}; using default"),
        ),
    }
}

fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
