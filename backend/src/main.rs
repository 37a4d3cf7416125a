//! Person registry entry-point: loads settings, wires adapters, and serves
//! the form routes.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use persons::config::AppSettings;
use persons::domain::RepositoryPersonService;
use persons::example_data::seed_example_persons;
use persons::inbound::http::health::HealthState;
use persons::inbound::http::session_config::{BuildMode, key_fingerprint, session_settings};
use persons::inbound::http::state::HttpState;
use persons::outbound::messages::CatalogueMessageSource;
use persons::outbound::persistence::InMemoryPersonRepository;

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = session_settings(&settings.session_toggles(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(fingerprint = %key_fingerprint(&session.key), "session key loaded");
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let messages = match settings.messages_path() {
        Some(path) => CatalogueMessageSource::from_file(path).map_err(std::io::Error::other)?,
        None => CatalogueMessageSource::english(),
    };
    let persons = Arc::new(RepositoryPersonService::new(
        Arc::new(InMemoryPersonRepository::default()),
        Arc::new(DefaultClock),
    ));
    if settings.seed_example_persons {
        seed_example_persons(persons.as_ref())
            .await
            .map_err(std::io::Error::other)?;
    }

    let health_state = web::Data::new(HealthState::new());
    let http_state = HttpState::new(persons, Arc::new(messages));
    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::from_session(session, bind_addr),
    )?;
    info!(%bind_addr, "person registry listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
