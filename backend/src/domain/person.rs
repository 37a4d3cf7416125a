//! Person aggregate.
//!
//! A person is identified by a store-assigned numeric id and carries a
//! validated first and last name plus audit timestamps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for either name.
pub const NAME_MAX_LENGTH: usize = 100;

/// Validation errors returned by the [`Person`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonValidationError {
    /// Ids are positive.
    #[error("person id must be a positive integer, got {0}")]
    InvalidId(i64),
    /// First name missing or blank.
    #[error("first name must not be empty")]
    EmptyFirstName,
    /// Last name missing or blank.
    #[error("last name must not be empty")]
    EmptyLastName,
    /// A trimmed name exceeded [`NAME_MAX_LENGTH`].
    #[error("{field} must be at most {max} characters")]
    NameTooLong { field: &'static str, max: usize },
}

/// Store-assigned person identifier.
///
/// # Examples
/// ```
/// use persons::domain::PersonId;
///
/// let id = PersonId::new(5).expect("positive id");
/// assert_eq!(id.get(), 5);
/// assert!(PersonId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PersonId(i64);

impl PersonId {
    /// Validate and construct an identifier.
    pub fn new(id: i64) -> Result<Self, PersonValidationError> {
        if id <= 0 {
            return Err(PersonValidationError::InvalidId(id));
        }
        Ok(Self(id))
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for PersonId {
    type Error = PersonValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonId> for i64 {
    fn from(value: PersonId) -> Self {
        value.0
    }
}

/// First and last name pair that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    first_name: String,
    last_name: String,
}

impl PersonName {
    /// Trim and validate both names.
    ///
    /// # Examples
    /// ```
    /// use persons::domain::PersonName;
    ///
    /// let name = PersonName::new("  Foo ", " Bar").expect("valid name");
    /// assert_eq!(name.first_name(), "Foo");
    /// assert_eq!(name.last_name(), "Bar");
    /// ```
    pub fn new(first_name: &str, last_name: &str) -> Result<Self, PersonValidationError> {
        let first_name = check_name(first_name, "first name", PersonValidationError::EmptyFirstName)?;
        let last_name = check_name(last_name, "last name", PersonValidationError::EmptyLastName)?;
        Ok(Self {
            first_name,
            last_name,
        })
    }

    /// Trimmed first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Trimmed last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

fn check_name(
    value: &str,
    field: &'static str,
    empty: PersonValidationError,
) -> Result<String, PersonValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(empty);
    }
    if value.chars().count() > NAME_MAX_LENGTH {
        return Err(PersonValidationError::NameTooLong {
            field,
            max: NAME_MAX_LENGTH,
        });
    }
    Ok(value.to_owned())
}

/// A person stored in the registry.
///
/// ## Invariants
/// - `first_name` and `last_name` are trimmed, non-blank, and at most
///   [`NAME_MAX_LENGTH`] characters.
/// - `modified_at` is never earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    id: PersonId,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    version: u64,
}

impl Person {
    /// Build a freshly created person at version zero.
    pub fn new(id: PersonId, name: PersonName, now: DateTime<Utc>) -> Self {
        let PersonName {
            first_name,
            last_name,
        } = name;
        Self {
            id,
            first_name,
            last_name,
            created_at: now,
            modified_at: now,
            version: 0,
        }
    }

    /// Apply new names, bump the version, and stamp the modification time.
    pub fn rename(&mut self, name: PersonName, now: DateTime<Utc>) {
        let PersonName {
            first_name,
            last_name,
        } = name;
        self.first_name = first_name;
        self.last_name = last_name;
        self.modified_at = now.max(self.created_at);
        self.version += 1;
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// First name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Full display name, `"<first> <last>"`.
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// When the person was stored.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the names last changed, or the creation time.
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Number of updates applied since creation.
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests;
