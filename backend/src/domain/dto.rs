//! Transfer objects carrying form data between the HTTP boundary and the
//! person service.
//!
//! Every field is optional: the DTOs mirror what a browser submitted, and
//! validation decides later whether the values are acceptable.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Person, PersonId};

/// Form backing object for creating or editing a person.
///
/// A DTO with an id describes an edit of an existing person; without one it
/// describes a creation request.
///
/// # Examples
/// ```
/// use persons::domain::PersonDto;
///
/// let dto = PersonDto::default();
/// assert!(dto.id.is_none() && dto.first_name.is_none() && dto.last_name.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    /// Present when editing an existing person.
    pub id: Option<PersonId>,
    /// Submitted first name, untrimmed.
    pub first_name: Option<String>,
    /// Submitted last name, untrimmed.
    pub last_name: Option<String>,
}

impl PersonDto {
    /// Build a DTO from raw parts.
    pub fn new(id: Option<PersonId>, first_name: Option<&str>, last_name: Option<&str>) -> Self {
        Self {
            id,
            first_name: first_name.map(str::to_owned),
            last_name: last_name.map(str::to_owned),
        }
    }

}

impl From<&Person> for PersonDto {
    fn from(person: &Person) -> Self {
        Self {
            id: Some(person.id()),
            first_name: Some(person.first_name().to_owned()),
            last_name: Some(person.last_name().to_owned()),
        }
    }
}

/// Strategy used to look people up by last name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchType {
    /// Exact, case-sensitive last-name match.
    #[default]
    MethodName,
    /// Case-insensitive last-name equality.
    NamedQuery,
    /// Case-insensitive last-name prefix match.
    QueryAnnotation,
}

/// Raised when a search type name is not one of the wire spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search type '{0}'")]
pub struct UnknownSearchType(pub String);

impl FromStr for SearchType {
    type Err = UnknownSearchType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "METHOD_NAME" => Ok(Self::MethodName),
            "NAMED_QUERY" => Ok(Self::NamedQuery),
            "QUERY_ANNOTATION" => Ok(Self::QueryAnnotation),
            other => Err(UnknownSearchType(other.to_owned())),
        }
    }
}

impl SearchType {
    /// Whether `last_name` satisfies this strategy for `term`.
    ///
    /// # Examples
    /// ```
    /// use persons::domain::SearchType;
    ///
    /// assert!(SearchType::MethodName.matches("Bar", "Bar"));
    /// assert!(!SearchType::MethodName.matches("bar", "Bar"));
    /// assert!(SearchType::NamedQuery.matches("bar", "Bar"));
    /// assert!(SearchType::QueryAnnotation.matches("ba", "Bar"));
    /// ```
    pub fn matches(self, term: &str, last_name: &str) -> bool {
        match self {
            Self::MethodName => last_name == term,
            Self::NamedQuery => last_name.to_lowercase() == term.to_lowercase(),
            Self::QueryAnnotation => last_name.to_lowercase().starts_with(&term.to_lowercase()),
        }
    }
}

/// Search criteria submitted from the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDto {
    /// Last name, or the start of one, to look for.
    pub search_term: Option<String>,
    /// Matching strategy; absent means [`SearchType::MethodName`].
    pub search_type: Option<SearchType>,
}

impl SearchDto {
    /// Criteria with both a term and a strategy.
    pub fn new(search_term: impl Into<String>, search_type: SearchType) -> Self {
        Self {
            search_term: Some(search_term.into()),
            search_type: Some(search_type),
        }
    }

    /// Trimmed search term, or `None` when absent or blank.
    pub fn term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Requested strategy, defaulting to [`SearchType::MethodName`].
    pub fn strategy(&self) -> SearchType {
        self.search_type.unwrap_or_default()
    }
}
