//! Message catalogue adapter implementing the `MessageSource` port.
//!
//! Patterns use `{n}` positional placeholders filled from the resolve
//! arguments. Unknown keys resolve to the key itself; placeholders without a
//! matching argument are left verbatim.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::messages::{
    ERROR_MESSAGE_KEY_DELETED_PERSON_WAS_NOT_FOUND, ERROR_MESSAGE_KEY_EDITED_PERSON_WAS_NOT_FOUND,
    FEEDBACK_MESSAGE_KEY_PERSON_CREATED, FEEDBACK_MESSAGE_KEY_PERSON_DELETED,
    FEEDBACK_MESSAGE_KEY_PERSON_EDITED,
};
use crate::domain::ports::MessageSource;

/// Errors raised while loading a catalogue file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueLoadError {
    /// The file could not be read.
    #[error("failed to read message catalogue at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a flat JSON object of strings.
    #[error("message catalogue at {path} is not a JSON object of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key → pattern message catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueMessageSource {
    patterns: BTreeMap<String, String>,
}

impl CatalogueMessageSource {
    /// Build a catalogue from explicit patterns.
    pub fn new(patterns: BTreeMap<String, String>) -> Self {
        Self { patterns }
    }

    /// The built-in English catalogue.
    ///
    /// # Examples
    /// ```
    /// use persons::domain::ports::MessageSource;
    /// use persons::outbound::messages::CatalogueMessageSource;
    ///
    /// let messages = CatalogueMessageSource::english();
    /// let text = messages.resolve("feedback.message.person.created", &["Foo Bar".to_owned()]);
    /// assert_eq!(text, "Person: Foo Bar was added.");
    /// ```
    pub fn english() -> Self {
        let patterns = [
            (FEEDBACK_MESSAGE_KEY_PERSON_CREATED, "Person: {0} was added."),
            (FEEDBACK_MESSAGE_KEY_PERSON_DELETED, "Person: {0} was deleted."),
            (FEEDBACK_MESSAGE_KEY_PERSON_EDITED, "Person: {0} was edited."),
            (
                ERROR_MESSAGE_KEY_DELETED_PERSON_WAS_NOT_FOUND,
                "The deleted person was not found.",
            ),
            (
                ERROR_MESSAGE_KEY_EDITED_PERSON_WAS_NOT_FOUND,
                "The edited person was not found.",
            ),
        ]
        .into_iter()
        .map(|(key, pattern)| (key.to_owned(), pattern.to_owned()))
        .collect();
        Self::new(patterns)
    }

    /// Load a JSON object file and layer it over the English defaults.
    pub fn from_file(path: &Path) -> Result<Self, CatalogueLoadError> {
        let raw = std::fs::read(path).map_err(|source| CatalogueLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: BTreeMap<String, String> =
            serde_json::from_slice(&raw).map_err(|source| CatalogueLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), entries = overrides.len(), "message catalogue loaded");
        let mut catalogue = Self::english();
        catalogue.patterns.extend(overrides);
        Ok(catalogue)
    }
}

impl MessageSource for CatalogueMessageSource {
    fn resolve(&self, key: &str, args: &[String]) -> String {
        match self.patterns.get(key) {
            Some(pattern) => format_pattern(pattern, args),
            None => {
                warn!(key, "no message pattern for key; using key as text");
                key.to_owned()
            }
        }
    }
}

fn format_pattern(pattern: &str, args: &[String]) -> String {
    let mut output = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replacement = after.find('}').and_then(|end| {
            after[..end]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map(|arg| (arg, end))
        });
        match replacement {
            Some((arg, end)) => {
                output.push_str(arg);
                rest = &after[end + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}
