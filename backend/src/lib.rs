//! Person registry service library.
//!
//! A hexagonal Actix Web application managing a registry of people through
//! HTML-style form flows: create, edit, delete, search, and list.

pub mod config;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
