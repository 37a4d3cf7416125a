//! Form validation producing field-scoped errors.
//!
//! Validation never fails fast: every offending field is reported so the
//! re-rendered form can flag all of them at once. Field names use the wire
//! (camelCase) spelling the view layer binds to.

use serde::Serialize;

use crate::domain::{NAME_MAX_LENGTH, PersonDto};

/// Wire name of the id field.
pub const FIELD_ID: &str = "id";
/// Wire name of the first name field.
pub const FIELD_FIRST_NAME: &str = "firstName";
/// Wire name of the last name field.
pub const FIELD_LAST_NAME: &str = "lastName";

/// Constraint violated by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldErrorCode {
    /// A required value was absent.
    NotNull,
    /// A text value was absent or blank.
    NotEmpty,
    /// A text value exceeded [`NAME_MAX_LENGTH`] characters once trimmed.
    Length,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Wire name of the offending field.
    pub field: &'static str,
    pub code: FieldErrorCode,
    /// Developer-facing English description. Views translate by `code`;
    /// the text is not resolved through the message catalogue.
    pub message: String,
}

/// Outcome of validating a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Whether any field failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every failure in report order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Names of the fields that failed, in report order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|error| error.field).collect()
    }

    fn reject(&mut self, field: &'static str, code: FieldErrorCode, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            code,
            message: message.into(),
        });
    }
}

/// Which form is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonForm {
    Create,
    Edit,
}

/// Validate a submitted person form.
///
/// # Examples
/// ```
/// use persons::domain::{PersonDto, PersonForm, validate_person_form};
///
/// let result = validate_person_form(&PersonDto::default(), PersonForm::Create);
/// assert_eq!(result.fields(), vec!["firstName", "lastName"]);
/// ```
pub fn validate_person_form(dto: &PersonDto, form: PersonForm) -> ValidationResult {
    let mut result = ValidationResult::default();
    if form == PersonForm::Edit && dto.id.is_none() {
        result.reject(FIELD_ID, FieldErrorCode::NotNull, "id is required");
    }
    check_name(&mut result, FIELD_FIRST_NAME, dto.first_name.as_deref());
    check_name(&mut result, FIELD_LAST_NAME, dto.last_name.as_deref());
    result
}

fn check_name(result: &mut ValidationResult, field: &'static str, value: Option<&str>) {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => {
            if value.chars().count() > NAME_MAX_LENGTH {
                result.reject(
                    field,
                    FieldErrorCode::Length,
                    format!("{field} must be at most {NAME_MAX_LENGTH} characters"),
                );
            }
        }
        _ => result.reject(field, FieldErrorCode::NotEmpty, format!("{field} must not be empty")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonId;
    use rstest::rstest;

    fn dto(id: Option<i64>, first: Option<&str>, last: Option<&str>) -> PersonDto {
        let id = id.map(|raw| PersonId::new(raw).expect("valid id"));
        PersonDto::new(id, first, last)
    }

    #[rstest]
    #[case(dto(None, None, None), vec![FIELD_FIRST_NAME, FIELD_LAST_NAME])]
    #[case(dto(None, None, Some("Bar")), vec![FIELD_FIRST_NAME])]
    #[case(dto(None, Some("Foo"), None), vec![FIELD_LAST_NAME])]
    #[case(dto(None, Some("  "), Some("")), vec![FIELD_FIRST_NAME, FIELD_LAST_NAME])]
    #[case(dto(None, Some("Foo"), Some("Bar")), vec![])]
    fn create_form_reports_blank_names(#[case] input: PersonDto, #[case] expected: Vec<&str>) {
        let result = validate_person_form(&input, PersonForm::Create);
        assert_eq!(result.fields(), expected);
        assert_eq!(result.has_errors(), !expected.is_empty());
    }

    #[rstest]
    #[case(dto(Some(5), None, None), vec![FIELD_FIRST_NAME, FIELD_LAST_NAME])]
    #[case(dto(Some(5), None, Some("BarUpdated")), vec![FIELD_FIRST_NAME])]
    #[case(dto(Some(5), Some("FooUpdated"), None), vec![FIELD_LAST_NAME])]
    #[case(dto(None, Some("Foo"), Some("Bar")), vec![FIELD_ID])]
    #[case(dto(Some(5), Some("Foo"), Some("Bar")), vec![])]
    fn edit_form_reports_missing_fields(#[case] input: PersonDto, #[case] expected: Vec<&str>) {
        let result = validate_person_form(&input, PersonForm::Edit);
        assert_eq!(result.fields(), expected);
    }

    #[rstest]
    fn blank_names_use_not_empty_code() {
        let result = validate_person_form(&PersonDto::default(), PersonForm::Create);
        assert!(
            result
                .errors()
                .iter()
                .all(|error| error.code == FieldErrorCode::NotEmpty)
        );
    }

    #[rstest]
    fn overlong_names_use_length_code() {
        let long = "a".repeat(NAME_MAX_LENGTH + 1);
        let result = validate_person_form(&dto(None, Some(&long), Some("Bar")), PersonForm::Create);
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code, FieldErrorCode::Length);
        assert_eq!(result.fields(), vec![FIELD_FIRST_NAME]);
    }

    #[rstest]
    fn length_is_measured_after_trimming() {
        let padded = format!(" {} ", "a".repeat(NAME_MAX_LENGTH));
        let result =
            validate_person_form(&dto(None, Some(&padded), Some("Bar")), PersonForm::Create);
        assert!(!result.has_errors());
    }
}
