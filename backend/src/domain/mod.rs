//! Domain primitives, services, and ports.
//!
//! Purpose: define the person aggregate, the transfer objects submitted by
//! forms, their validation, and the service that coordinates persistence.
//! Nothing here depends on Actix; inbound adapters translate HTTP into these
//! types and back.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `Person`, `PersonId`, `PersonName`: the aggregate and its parts.
//! - `PersonDto`, `SearchDto`, `SearchType`: form transfer objects.
//! - `validate_person_form`: field-level validation of person forms.
//! - `RepositoryPersonService`: the person service over a repository port.

pub mod dto;
pub mod error;
pub mod messages;
pub mod person;
pub mod person_service;
pub mod ports;
pub mod trace_id;
pub mod validation;

pub use self::dto::{PersonDto, SearchDto, SearchType, UnknownSearchType};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::person::{NAME_MAX_LENGTH, Person, PersonId, PersonName, PersonValidationError};
pub use self::person_service::RepositoryPersonService;
pub use self::trace_id::TraceId;
pub use self::validation::{
    FIELD_FIRST_NAME, FIELD_ID, FIELD_LAST_NAME, FieldError, FieldErrorCode, PersonForm,
    ValidationResult, validate_person_form,
};
