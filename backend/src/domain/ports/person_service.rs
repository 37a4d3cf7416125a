//! Driving port for person use-cases.
//!
//! Inbound adapters call this port to create, edit, remove, and look up
//! people. Not-found is reported as a typed error rather than a generic
//! failure so callers can turn it into user feedback.

use async_trait::async_trait;

use crate::domain::{Person, PersonDto, PersonId, SearchDto};

use super::define_port_error;

define_port_error! {
    /// Failures reported by the person service.
    pub enum PersonServiceError {
        /// The targeted person does not exist.
        NotFound { id: i64 } => "person {id} was not found",
        /// The submitted data cannot describe a person.
        InvalidInput { message: String } => "invalid person data: {message}",
        /// The backing store is temporarily unreachable.
        Unavailable { message: String } => "person store unavailable: {message}",
        /// Any other store failure.
        Internal { message: String } => "person store error: {message}",
    }
}

impl PersonServiceError {
    /// Whether this failure means the target person is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonService: Send + Sync {
    /// Create a person from a validated DTO.
    async fn create(&self, dto: &PersonDto) -> Result<Person, PersonServiceError>;

    /// Apply a validated DTO to the person it identifies.
    async fn update(&self, dto: &PersonDto) -> Result<Person, PersonServiceError>;

    /// Remove a person, returning the removed record.
    async fn delete(&self, id: PersonId) -> Result<Person, PersonServiceError>;

    /// Look a person up; `None` when missing.
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonServiceError>;

    /// Every stored person ordered by identifier.
    async fn find_all(&self) -> Result<Vec<Person>, PersonServiceError>;

    /// People whose last name satisfies the criteria.
    async fn search(&self, criteria: &SearchDto) -> Result<Vec<Person>, PersonServiceError>;
}
