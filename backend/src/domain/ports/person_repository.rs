//! Driven port for person persistence adapters and their errors.
//!
//! The repository stores whole aggregates; identity assignment belongs to
//! the store, so inserts take a [`PersonName`] and a creation timestamp and
//! hand back the stored [`Person`]. Renames happen inside the store so two
//! concurrent edits never read the same version.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Person, PersonId, PersonName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by person repository adapters.
    pub enum PersonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "person repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "person repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Store a new person, assigning the next identifier.
    async fn insert(
        &self,
        name: PersonName,
        created_at: DateTime<Utc>,
    ) -> Result<Person, PersonRepositoryError>;

    /// Apply `name` to a stored person in one atomic step, bumping its
    /// version and stamping `modified_at`. Returns `None` when the id is
    /// unknown.
    async fn rename(
        &self,
        id: PersonId,
        name: PersonName,
        modified_at: DateTime<Utc>,
    ) -> Result<Option<Person>, PersonRepositoryError>;

    /// Remove a person, returning the removed record when it existed.
    async fn remove(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError>;

    /// Fetch a person by identifier.
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError>;

    /// Fetch every person ordered by identifier.
    async fn find_all(&self) -> Result<Vec<Person>, PersonRepositoryError>;
}
