//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod message_source;
mod person_repository;
mod person_service;

#[cfg(test)]
pub use message_source::MockMessageSource;
pub use message_source::MessageSource;
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{PersonRepository, PersonRepositoryError};
#[cfg(test)]
pub use person_service::MockPersonService;
pub use person_service::{PersonService, PersonServiceError};
