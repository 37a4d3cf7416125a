//! Port resolving message keys to display text.

/// Resolves feedback and error message keys.
///
/// Arguments fill `{0}`, `{1}`, ... placeholders in the resolved pattern.
/// Implementations fall back to the key itself when it is unknown so a
/// missing translation never breaks a redirect.
#[cfg_attr(test, mockall::automock)]
pub trait MessageSource: Send + Sync {
    fn resolve(&self, key: &str, args: &[String]) -> String;
}
