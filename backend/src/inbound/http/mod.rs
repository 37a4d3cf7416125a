//! HTTP inbound adapter: person form routes, health probes, and sessions.

pub mod controller;
pub mod error;
pub mod flash;
pub mod health;
pub mod persons;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod view;

pub use error::ApiResult;
