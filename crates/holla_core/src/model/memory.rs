//! Memory journal entry model.
//!
//! # Responsibility
//! - Define the persisted shape of one free-text journal entry.
//!
//! # Invariants
//! - `text` is validated non-empty before construction, never after.
//! - `id` is strictly increasing within a runtime session.

use serde::{Deserialize, Serialize};

/// One free-text journal entry.
///
/// `date` and `timestamp` are display strings captured at creation time;
/// they are never reinterpreted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Unique monotonic token; time-of-creation based.
    pub id: i64,
    pub text: String,
    /// Local calendar date at creation, `%Y-%m-%d`.
    pub date: String,
    /// Local time of day at creation, `%H:%M:%S`.
    pub timestamp: String,
}
