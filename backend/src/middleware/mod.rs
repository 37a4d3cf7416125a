//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route. Currently only
//! trace identifier propagation.

pub mod trace;

pub use trace::Trace;
