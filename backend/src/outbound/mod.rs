//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: the in-memory person store.
//! - **messages**: the message catalogue backing feedback and error text.
//!
//! Adapters translate between domain types and their storage; they contain
//! no business logic.

pub mod messages;
pub mod persistence;
