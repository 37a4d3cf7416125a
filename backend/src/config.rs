//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PERSONS_*` environment variables, and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::inbound::http::session_config::SessionToggles;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Raw toggle as the configuration layers present it.
#[derive(Deserialize)]
#[serde(untagged)]
enum ToggleValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

/// Keep toggles textual so session validation sees every spelling alike.
fn toggle_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<ToggleValue>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        ToggleValue::Flag(flag) => flag.to_string(),
        ToggleValue::Number(number) => number.to_string(),
        ToggleValue::Text(text) => text,
    }))
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PERSONS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// JSON message catalogue layered over the built-in English messages.
    pub messages_path: Option<PathBuf>,
    /// Session key file; see `PERSONS_SESSION_KEY_FILE`.
    pub session_key_file: Option<PathBuf>,
    /// Boolean toggle; environment values such as `1` or `true` arrive typed.
    #[serde(default, deserialize_with = "toggle_text")]
    pub session_cookie_secure: Option<String>,
    /// `Strict`, `Lax`, or `None`.
    pub session_same_site: Option<String>,
    #[serde(default, deserialize_with = "toggle_text")]
    pub session_allow_ephemeral: Option<String>,
    /// Populate the in-memory store with a few people at startup.
    #[ortho_config(default = false)]
    pub seed_example_persons: bool,
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Configured message catalogue file, if any.
    pub fn messages_path(&self) -> Option<&Path> {
        self.messages_path.as_deref()
    }

    /// Raw session toggles for build-mode validation.
    pub fn session_toggles(&self) -> SessionToggles<'_> {
        SessionToggles {
            key_file: self.session_key_file.as_deref(),
            cookie_secure: self.session_cookie_secure.as_deref(),
            same_site: self.session_same_site.as_deref(),
            allow_ephemeral: self.session_allow_ephemeral.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "PERSONS_BIND_ADDR",
        "PERSONS_MESSAGES_PATH",
        "PERSONS_SESSION_KEY_FILE",
        "PERSONS_SESSION_COOKIE_SECURE",
        "PERSONS_SESSION_SAME_SITE",
        "PERSONS_SESSION_ALLOW_EPHEMERAL",
        "PERSONS_SEED_EXAMPLE_PERSONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("persons")]).expect("config should load")
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.messages_path().is_none());
        assert!(!settings.seed_example_persons);
        let toggles = settings.session_toggles();
        assert!(toggles.key_file.is_none());
        assert!(toggles.cookie_secure.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PERSONS_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("PERSONS_MESSAGES_PATH", Some("/etc/persons/messages.json".to_owned())),
            ("PERSONS_SESSION_KEY_FILE", Some("/run/secrets/key".to_owned())),
            ("PERSONS_SESSION_COOKIE_SECURE", Some("0".to_owned())),
            ("PERSONS_SESSION_SAME_SITE", Some("Strict".to_owned())),
            ("PERSONS_SESSION_ALLOW_EPHEMERAL", Some("1".to_owned())),
            ("PERSONS_SEED_EXAMPLE_PERSONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9090
        );
        assert_eq!(
            settings.messages_path(),
            Some(Path::new("/etc/persons/messages.json"))
        );
        assert!(settings.seed_example_persons);
        let toggles = settings.session_toggles();
        assert_eq!(toggles.key_file, Some(Path::new("/run/secrets/key")));
        assert_eq!(toggles.cookie_secure, Some("0"));
        assert_eq!(toggles.same_site, Some("Strict"));
        assert_eq!(toggles.allow_ephemeral, Some("1"));
    }

    #[rstest]
    #[case("1", "1")]
    #[case("0", "0")]
    #[case("true", "true")]
    #[case("no", "no")]
    fn session_toggles_accept_numeric_and_word_values(#[case] raw: &str, #[case] expected: &str) {
        let _guard = lock_env([
            ("PERSONS_SESSION_COOKIE_SECURE", Some(raw.to_owned())),
            ("PERSONS_SESSION_ALLOW_EPHEMERAL", Some(raw.to_owned())),
        ]);

        let settings = load_from_empty_args();
        let toggles = settings.session_toggles();
        assert_eq!(toggles.cookie_secure, Some(expected));
        assert_eq!(toggles.allow_ephemeral, Some(expected));
    }

    #[rstest]
    fn invalid_bind_address_is_reported() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let mut settings = load_from_empty_args();
        settings.bind_addr = Some("not-an-address".to_owned());
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
