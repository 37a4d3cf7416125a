//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::RepositoryPersonService;
use crate::outbound::messages::CatalogueMessageSource;
use crate::outbound::persistence::InMemoryPersonRepository;

use super::state::HttpState;

/// Session middleware with a fresh key, cookie name `session`, and the
/// `Secure` flag off for plain-HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_noon() -> Self {
        let instant = Utc
            .with_ymd_and_hms(2024, 5, 17, 12, 0, 0)
            .single()
            .unwrap_or_default();
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// State backed by a fresh in-memory store and the English catalogue.
pub fn in_memory_state() -> HttpState {
    let service = RepositoryPersonService::new(
        Arc::new(InMemoryPersonRepository::default()),
        Arc::new(FixedClock::at_noon()),
    );
    HttpState::new(
        Arc::new(service),
        Arc::new(CatalogueMessageSource::english()),
    )
}

/// The `session` cookie set by a response, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
