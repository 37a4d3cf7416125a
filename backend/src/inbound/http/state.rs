//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` so they depend only on domain ports
//! and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{MessageSource, PersonService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Person use cases.
    pub persons: Arc<dyn PersonService>,
    /// Feedback and error text lookup.
    pub messages: Arc<dyn MessageSource>,
}

impl HttpState {
    /// Bundle the person service with the message catalogue.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use persons::domain::RepositoryPersonService;
    /// use persons::inbound::http::state::HttpState;
    /// use persons::outbound::messages::CatalogueMessageSource;
    /// use persons::outbound::persistence::InMemoryPersonRepository;
    ///
    /// let service = RepositoryPersonService::new(
    ///     Arc::new(InMemoryPersonRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _state = HttpState::new(
    ///     Arc::new(service),
    ///     Arc::new(CatalogueMessageSource::english()),
    /// );
    /// ```
    pub fn new(persons: Arc<dyn PersonService>, messages: Arc<dyn MessageSource>) -> Self {
        Self { persons, messages }
    }
}
