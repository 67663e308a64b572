//! Domain model for habits, journal entries and mood feedback.
//!
//! # Responsibility
//! - Define the persisted data shapes and the pure derivations over them.
//!
//! # Invariants
//! - A day's habit records always cover exactly the catalog's id set.
//! - Derived values (completion percentage, mood) are never persisted.

pub mod habit;
pub mod memory;
pub mod mood;
