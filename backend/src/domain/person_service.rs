//! Person service implementing the [`PersonService`] driving port on top of
//! a [`PersonRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    PersonRepository, PersonRepositoryError, PersonService, PersonServiceError,
};
use crate::domain::{Person, PersonDto, PersonId, PersonName, SearchDto};

/// Repository-backed person service.
#[derive(Clone)]
pub struct RepositoryPersonService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RepositoryPersonService<R> {
    /// Create a service over `repository`, stamping times from `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use persons::domain::RepositoryPersonService;
    /// use persons::outbound::persistence::InMemoryPersonRepository;
    ///
    /// let service = RepositoryPersonService::new(
    ///     Arc::new(InMemoryPersonRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn map_repository_error(error: PersonRepositoryError) -> PersonServiceError {
    match error {
        PersonRepositoryError::Connection { message } => PersonServiceError::unavailable(message),
        PersonRepositoryError::Query { message } => PersonServiceError::internal(message),
    }
}

fn name_from(dto: &PersonDto) -> Result<PersonName, PersonServiceError> {
    let first_name = dto.first_name.as_deref().unwrap_or_default();
    let last_name = dto.last_name.as_deref().unwrap_or_default();
    PersonName::new(first_name, last_name)
        .map_err(|err| PersonServiceError::invalid_input(err.to_string()))
}

#[async_trait]
impl<R> PersonService for RepositoryPersonService<R>
where
    R: PersonRepository,
{
    async fn create(&self, dto: &PersonDto) -> Result<Person, PersonServiceError> {
        let name = name_from(dto)?;
        let created = self
            .repository
            .insert(name, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(person_id = %created.id(), "person created");
        Ok(created)
    }

    async fn update(&self, dto: &PersonDto) -> Result<Person, PersonServiceError> {
        let id = dto
            .id
            .ok_or_else(|| PersonServiceError::invalid_input("id is required for updates"))?;
        let name = name_from(dto)?;

        let person = self
            .repository
            .rename(id, name, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| PersonServiceError::not_found(id.get()))?;
        info!(person_id = %id, version = person.version(), "person updated");
        Ok(person)
    }

    async fn delete(&self, id: PersonId) -> Result<Person, PersonServiceError> {
        let removed = self
            .repository
            .remove(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| PersonServiceError::not_found(id.get()))?;
        info!(person_id = %id, "person deleted");
        Ok(removed)
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn find_all(&self) -> Result<Vec<Person>, PersonServiceError> {
        self.repository.find_all().await.map_err(map_repository_error)
    }

    async fn search(&self, criteria: &SearchDto) -> Result<Vec<Person>, PersonServiceError> {
        let Some(term) = criteria.term() else {
            debug!("blank search term; returning no results");
            return Ok(Vec::new());
        };
        let strategy = criteria.strategy();
        let persons = self.find_all().await?;
        let matches: Vec<Person> = persons
            .into_iter()
            .filter(|person| strategy.matches(term, person.last_name()))
            .collect();
        debug!(?strategy, results = matches.len(), "person search finished");
        Ok(matches)
    }
}

#[cfg(test)]
#[path = "person_service_tests.rs"]
mod tests;
