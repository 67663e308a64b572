//! Durable key derivation.
//!
//! # Responsibility
//! - Derive the namespaced keys each component owns in the shared store.
//!
//! # Invariants
//! - `ledger_key` is injective in `(user_id, day)`: the day segment has a
//!   fixed `%Y-%m-%d` shape and terminates the key, so no two distinct
//!   pairs collide even when user ids contain `/`.
//! - Every per-user key embeds the user id; there is no unscoped variant.

use chrono::NaiveDate;

/// Single process-wide key holding the remembered identity.
pub const REMEMBERED_USER_KEY: &str = "session/remembered_user";

/// Key of one user's habit records for one local calendar day.
pub fn ledger_key(user_id: &str, day: NaiveDate) -> String {
    format!("habits/{user_id}/{}", day.format("%Y-%m-%d"))
}

/// Key of one user's full memory journal.
pub fn journal_key(user_id: &str) -> String {
    format!("memories/{user_id}")
}
