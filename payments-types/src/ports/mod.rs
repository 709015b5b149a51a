//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod ids;
mod outcome;
mod repository;

pub use ids::{IdGenerator, SequentialIds, TimeOrderedIds};
pub use outcome::{AlwaysSucceeds, OutcomeResolver};
pub use repository::EntityStore;
