//! Example people loaded at startup when `seed_example_persons` is enabled.

use tracing::info;

use crate::domain::PersonDto;
use crate::domain::ports::{PersonService, PersonServiceError};

const EXAMPLE_PERSONS: [(&str, &str); 4] = [
    ("Foo", "Bar"),
    ("John", "Doe"),
    ("Jane", "Doe"),
    ("Ada", "Lovelace"),
];

/// Create the example people through the service, returning how many were
/// added.
pub async fn seed_example_persons(service: &dyn PersonService) -> Result<usize, PersonServiceError> {
    for (first_name, last_name) in EXAMPLE_PERSONS {
        service
            .create(&PersonDto::new(None, Some(first_name), Some(last_name)))
            .await?;
    }
    info!(count = EXAMPLE_PERSONS.len(), "example persons seeded");
    Ok(EXAMPLE_PERSONS.len())
}
