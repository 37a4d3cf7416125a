//! In-memory `PersonRepository` adapter.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::error;

use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonId, PersonName};

#[derive(Debug)]
struct Registry {
    next_id: i64,
    persons: BTreeMap<PersonId, Person>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            next_id: 1,
            persons: BTreeMap::new(),
        }
    }
}

/// Thread-safe in-memory person store.
///
/// Locks are held only inside synchronous sections, never across an await.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    registry: RwLock<Registry>,
}

impl InMemoryPersonRepository {
    fn read(&self) -> Result<RwLockReadGuard<'_, Registry>, PersonRepositoryError> {
        self.registry.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Registry>, PersonRepositoryError> {
        self.registry.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> PersonRepositoryError {
    error!("person registry lock poisoned");
    PersonRepositoryError::query("registry lock poisoned")
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn insert(
        &self,
        name: PersonName,
        created_at: DateTime<Utc>,
    ) -> Result<Person, PersonRepositoryError> {
        let mut registry = self.write()?;
        let id = PersonId::new(registry.next_id)
            .map_err(|err| PersonRepositoryError::query(err.to_string()))?;
        registry.next_id = registry
            .next_id
            .checked_add(1)
            .ok_or_else(|| PersonRepositoryError::query("person id sequence exhausted"))?;
        let person = Person::new(id, name, created_at);
        registry.persons.insert(id, person.clone());
        Ok(person)
    }

    async fn rename(
        &self,
        id: PersonId,
        name: PersonName,
        modified_at: DateTime<Utc>,
    ) -> Result<Option<Person>, PersonRepositoryError> {
        let mut registry = self.write()?;
        Ok(registry.persons.get_mut(&id).map(|person| {
            person.rename(name, modified_at);
            person.clone()
        }))
    }

    async fn remove(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError> {
        Ok(self.write()?.persons.remove(&id))
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError> {
        Ok(self.read()?.persons.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Person>, PersonRepositoryError> {
        Ok(self.read()?.persons.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> InMemoryPersonRepository {
        InMemoryPersonRepository::default()
    }

    fn name(first: &str, last: &str) -> PersonName {
        PersonName::new(first, last).expect("valid name")
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids(repository: InMemoryPersonRepository) {
        let now = Utc::now();
        let first = repository
            .insert(name("Foo", "Bar"), now)
            .await
            .expect("insert");
        let second = repository
            .insert(name("Ada", "Lovelace"), now)
            .await
            .expect("insert");

        assert_eq!(first.id().get(), 1);
        assert_eq!(second.id().get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_not_reused_after_removal(repository: InMemoryPersonRepository) {
        let now = Utc::now();
        let first = repository
            .insert(name("Foo", "Bar"), now)
            .await
            .expect("insert");
        repository.remove(first.id()).await.expect("remove");

        let next = repository
            .insert(name("Foo", "Bar"), now)
            .await
            .expect("insert");
        assert_eq!(next.id().get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn rename_updates_only_known_people(repository: InMemoryPersonRepository) {
        let now = Utc::now();
        let person = repository
            .insert(name("Foo", "Bar"), now)
            .await
            .expect("insert");

        let renamed = repository
            .rename(person.id(), name("FooUpdated", "BarUpdated"), now)
            .await
            .expect("rename")
            .expect("present");
        assert_eq!(renamed.first_name(), "FooUpdated");
        assert_eq!(renamed.version(), 1);
        let stored = repository
            .find_by_id(person.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored, renamed);

        repository.remove(person.id()).await.expect("remove");
        let missing = repository
            .rename(person.id(), name("Foo", "Bar"), now)
            .await
            .expect("rename");
        assert!(missing.is_none());
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_renames_each_bump_the_version() {
        const EDITS: u64 = 32;
        let repository = Arc::new(InMemoryPersonRepository::default());
        let person = repository
            .insert(name("Foo", "Bar"), Utc::now())
            .await
            .expect("insert");

        let tasks: Vec<_> = (0..EDITS)
            .map(|edit| {
                let repository = Arc::clone(&repository);
                let id = person.id();
                tokio::spawn(async move {
                    repository
                        .rename(id, name("Foo", &format!("Bar{edit}")), Utc::now())
                        .await
                        .expect("rename")
                        .expect("present")
                })
            })
            .collect();
        for task in tasks {
            task.await.expect("rename task");
        }

        let stored = repository
            .find_by_id(person.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.version(), EDITS);
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_orders_by_id(repository: InMemoryPersonRepository) {
        let now = Utc::now();
        for (first, last) in [("C", "Zed"), ("A", "Young"), ("B", "Xavier")] {
            repository
                .insert(name(first, last), now)
                .await
                .expect("insert");
        }

        let ids: Vec<i64> = repository
            .find_all()
            .await
            .expect("find all")
            .iter()
            .map(|person| person.id().get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn remove_missing_person_returns_none(repository: InMemoryPersonRepository) {
        let id = PersonId::new(42).expect("valid id");
        assert!(repository.remove(id).await.expect("remove").is_none());
    }
}
