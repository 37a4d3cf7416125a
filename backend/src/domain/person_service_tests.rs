//! Tests for the repository-backed person service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::SearchType;
use crate::domain::ports::MockPersonRepository;
use crate::outbound::persistence::InMemoryPersonRepository;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn id(raw: i64) -> PersonId {
    PersonId::new(raw).expect("valid id")
}

fn stored(raw_id: i64, first: &str, last: &str, at: DateTime<Utc>) -> Person {
    let name = PersonName::new(first, last).expect("valid name");
    Person::new(id(raw_id), name, at)
}

fn make_service(
    repo: MockPersonRepository,
    now: DateTime<Utc>,
) -> RepositoryPersonService<MockPersonRepository> {
    RepositoryPersonService::new(Arc::new(repo), Arc::new(FixedClock(now)))
}

#[rstest]
#[tokio::test]
async fn create_inserts_person_stamped_with_clock(now: DateTime<Utc>) {
    let mut repo = MockPersonRepository::new();
    repo.expect_insert()
        .withf(move |name, created_at| {
            name.first_name() == "Foo" && name.last_name() == "Bar" && *created_at == now
        })
        .times(1)
        .returning(|name, created_at| Ok(Person::new(id(1), name, created_at)));

    let service = make_service(repo, now);
    let dto = PersonDto::new(None, Some("Foo"), Some("Bar"));

    let created = service.create(&dto).await.expect("create succeeds");
    assert_eq!(created.id(), id(1));
    assert_eq!(created.created_at(), now);
}

#[rstest]
#[tokio::test]
async fn create_rejects_blank_names_without_touching_store(now: DateTime<Utc>) {
    let repo = MockPersonRepository::new();
    let service = make_service(repo, now);
    let dto = PersonDto::new(None, Some(" "), Some("Bar"));

    let error = service.create(&dto).await.expect_err("invalid input");
    assert!(matches!(error, PersonServiceError::InvalidInput { .. }));
}

#[rstest]
#[tokio::test]
async fn update_renames_and_bumps_version(now: DateTime<Utc>) {
    let created_at = now - TimeDelta::days(1);
    let mut existing = stored(5, "Foo", "Bar", created_at);
    let mut repo = MockPersonRepository::new();
    repo.expect_rename()
        .withf(move |person_id, name, modified_at| {
            *person_id == id(5) && name.first_name() == "FooUpdated" && *modified_at == now
        })
        .times(1)
        .return_once(move |_, name, modified_at| {
            existing.rename(name, modified_at);
            Ok(Some(existing))
        });

    let service = make_service(repo, now);
    let dto = PersonDto::new(Some(id(5)), Some("FooUpdated"), Some("BarUpdated"));

    let updated = service.update(&dto).await.expect("update succeeds");
    assert_eq!(updated.first_name(), "FooUpdated");
    assert_eq!(updated.last_name(), "BarUpdated");
    assert_eq!(updated.version(), 1);
    assert_eq!(updated.modified_at(), now);
    assert_eq!(updated.created_at(), created_at);
}

#[rstest]
#[tokio::test]
async fn update_reports_missing_person_as_not_found(now: DateTime<Utc>) {
    let mut repo = MockPersonRepository::new();
    repo.expect_rename()
        .times(1)
        .return_once(|_, _, _| Ok(None));

    let service = make_service(repo, now);
    let dto = PersonDto::new(Some(id(5)), Some("Foo"), Some("Bar"));

    let error = service.update(&dto).await.expect_err("not found");
    assert_eq!(error, PersonServiceError::NotFound { id: 5 });
    assert!(error.is_not_found());
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_never_lose_a_version(now: DateTime<Utc>) {
    const EDITS: u64 = 16;
    let service = Arc::new(RepositoryPersonService::new(
        Arc::new(InMemoryPersonRepository::default()),
        Arc::new(FixedClock(now)),
    ));
    let created = service
        .create(&PersonDto::new(None, Some("Foo"), Some("Bar")))
        .await
        .expect("create succeeds");

    let tasks: Vec<_> = (0..EDITS)
        .map(|edit| {
            let service = Arc::clone(&service);
            let last_name = format!("Bar{edit}");
            let dto = PersonDto::new(Some(created.id()), Some("Foo"), Some(&last_name));
            tokio::spawn(async move { service.update(&dto).await.expect("update succeeds") })
        })
        .collect();
    for task in tasks {
        task.await.expect("update task");
    }

    let stored = service
        .find_by_id(created.id())
        .await
        .expect("find succeeds")
        .expect("present");
    assert_eq!(stored.version(), EDITS);
}

#[rstest]
#[tokio::test]
async fn update_requires_an_id(now: DateTime<Utc>) {
    let service = make_service(MockPersonRepository::new(), now);
    let dto = PersonDto::new(None, Some("Foo"), Some("Bar"));

    let error = service.update(&dto).await.expect_err("invalid input");
    assert!(matches!(error, PersonServiceError::InvalidInput { .. }));
}

#[rstest]
#[tokio::test]
async fn delete_returns_removed_person(now: DateTime<Utc>) {
    let existing = stored(5, "Foo", "Bar", now);
    let expected = existing.clone();
    let mut repo = MockPersonRepository::new();
    repo.expect_remove()
        .with(eq(id(5)))
        .times(1)
        .return_once(move |_| Ok(Some(existing)));

    let service = make_service(repo, now);
    let removed = service.delete(id(5)).await.expect("delete succeeds");
    assert_eq!(removed, expected);
}

#[rstest]
#[tokio::test]
async fn delete_reports_missing_person_as_not_found(now: DateTime<Utc>) {
    let mut repo = MockPersonRepository::new();
    repo.expect_remove().times(1).return_once(|_| Ok(None));

    let service = make_service(repo, now);
    let error = service.delete(id(9)).await.expect_err("not found");
    assert_eq!(error, PersonServiceError::NotFound { id: 9 });
}

#[rstest]
#[case(PersonRepositoryError::connection("refused"), true)]
#[case(PersonRepositoryError::query("syntax"), false)]
#[tokio::test]
async fn repository_failures_map_to_service_errors(
    now: DateTime<Utc>,
    #[case] failure: PersonRepositoryError,
    #[case] unavailable: bool,
) {
    let mut repo = MockPersonRepository::new();
    repo.expect_find_all().return_once(move || Err(failure));

    let service = make_service(repo, now);
    let error = service.find_all().await.expect_err("store failure");
    if unavailable {
        assert!(matches!(error, PersonServiceError::Unavailable { .. }));
    } else {
        assert!(matches!(error, PersonServiceError::Internal { .. }));
    }
}

fn directory(now: DateTime<Utc>) -> Vec<Person> {
    vec![
        stored(1, "Foo", "Bar", now),
        stored(2, "John", "bar", now),
        stored(3, "Jane", "Barton", now),
        stored(4, "Ada", "Lovelace", now),
    ]
}

#[rstest]
#[case(SearchType::MethodName, "Bar", vec![1])]
#[case(SearchType::NamedQuery, "BAR", vec![1, 2])]
#[case(SearchType::QueryAnnotation, "bar", vec![1, 2, 3])]
#[tokio::test]
async fn search_applies_strategy(
    now: DateTime<Utc>,
    #[case] search_type: SearchType,
    #[case] term: &str,
    #[case] expected_ids: Vec<i64>,
) {
    let persons = directory(now);
    let mut repo = MockPersonRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(move || Ok(persons));

    let service = make_service(repo, now);
    let results = service
        .search(&SearchDto::new(term, search_type))
        .await
        .expect("search succeeds");

    let ids: Vec<i64> = results.iter().map(|person| person.id().get()).collect();
    assert_eq!(ids, expected_ids);
}

#[rstest]
#[tokio::test]
async fn blank_search_skips_the_store(now: DateTime<Utc>) {
    let mut repo = MockPersonRepository::new();
    repo.expect_find_all().never();

    let service = make_service(repo, now);
    let results = service
        .search(&SearchDto::default())
        .await
        .expect("search succeeds");
    assert!(results.is_empty());
}
