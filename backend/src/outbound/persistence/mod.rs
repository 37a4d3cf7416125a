//! Person persistence adapters.
//!
//! Only an in-memory store ships today; it keeps the whole registry in a
//! lock-protected ordered map and assigns identifiers from a monotonically
//! increasing sequence, so ids are never reused after a delete.

mod in_memory_person_repository;

pub use in_memory_person_repository::InMemoryPersonRepository;
