//! Tests for the person aggregate.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn person(created_at: DateTime<Utc>) -> Person {
    let id = PersonId::new(5).expect("valid id");
    let name = PersonName::new("Foo", "Bar").expect("valid name");
    Person::new(id, name, created_at)
}

#[rstest]
#[case(0)]
#[case(-3)]
fn rejects_non_positive_ids(#[case] raw: i64) {
    assert_eq!(PersonId::new(raw), Err(PersonValidationError::InvalidId(raw)));
}

#[rstest]
#[case("", "Bar", PersonValidationError::EmptyFirstName)]
#[case("   ", "Bar", PersonValidationError::EmptyFirstName)]
#[case("Foo", "", PersonValidationError::EmptyLastName)]
#[case("Foo", "\t", PersonValidationError::EmptyLastName)]
fn rejects_blank_names(
    #[case] first: &str,
    #[case] last: &str,
    #[case] expected: PersonValidationError,
) {
    assert_eq!(PersonName::new(first, last), Err(expected));
}

#[rstest]
fn accepts_names_at_maximum_length() {
    let name = "a".repeat(NAME_MAX_LENGTH);
    let result = PersonName::new(&name, &name).expect("valid at boundary");
    assert_eq!(result.first_name(), name);
}

#[rstest]
fn trims_surrounding_whitespace() {
    let name = PersonName::new("  Foo ", "\tBar  ").expect("valid name");
    assert_eq!(name.first_name(), "Foo");
    assert_eq!(name.last_name(), "Bar");
}

#[rstest]
fn length_limit_applies_to_trimmed_value() {
    let padded = format!("  {}  ", "a".repeat(NAME_MAX_LENGTH));
    let name = PersonName::new(&padded, "Bar").expect("valid once trimmed");
    assert_eq!(name.first_name().chars().count(), NAME_MAX_LENGTH);
}

#[rstest]
fn rejects_names_over_maximum_length() {
    let long = "a".repeat(NAME_MAX_LENGTH + 1);
    assert_eq!(
        PersonName::new("Foo", &long),
        Err(PersonValidationError::NameTooLong {
            field: "last name",
            max: NAME_MAX_LENGTH,
        })
    );
}

#[rstest]
fn new_person_starts_at_version_zero(person: Person, created_at: DateTime<Utc>) {
    assert_eq!(person.version(), 0);
    assert_eq!(person.created_at(), created_at);
    assert_eq!(person.modified_at(), created_at);
    assert_eq!(person.name(), "Foo Bar");
}

#[rstest]
fn rename_bumps_version_and_modification_time(mut person: Person, created_at: DateTime<Utc>) {
    let later = created_at + chrono::TimeDelta::minutes(5);
    let name = PersonName::new("FooUpdated", "BarUpdated").expect("valid name");

    person.rename(name, later);

    assert_eq!(person.first_name(), "FooUpdated");
    assert_eq!(person.last_name(), "BarUpdated");
    assert_eq!(person.version(), 1);
    assert_eq!(person.modified_at(), later);
    assert_eq!(person.created_at(), created_at);
}

#[rstest]
fn rename_never_moves_modification_before_creation(mut person: Person, created_at: DateTime<Utc>) {
    let earlier = created_at - chrono::TimeDelta::hours(1);
    let name = PersonName::new("Foo", "Baz").expect("valid name");

    person.rename(name, earlier);

    assert_eq!(person.modified_at(), created_at);
}

#[rstest]
fn serialises_camel_case_fields(person: Person) {
    let value = serde_json::to_value(&person).expect("serialise person");
    assert_eq!(value.get("id").and_then(serde_json::Value::as_i64), Some(5));
    assert_eq!(
        value.get("firstName").and_then(serde_json::Value::as_str),
        Some("Foo")
    );
    assert!(value.get("first_name").is_none());
    assert!(value.get("createdAt").is_some());
}
