//! Core state-and-synchronization engine for the Holla habit tracker.
//! This crate is the single source of truth for business invariants; the
//! rendering layer only displays the observables and forwards intents.

pub mod app;
pub mod bus;
pub mod journal;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;

pub use app::{Clock, HollaApp};
pub use bus::{EventBus, SubscriptionId, Topic};
pub use journal::MemoryJournal;
pub use ledger::HabitLedger;
pub use logging::{default_log_level, init_logging};
pub use model::habit::{
    completion_percentage, default_catalog, default_records, HabitCategory, HabitDefinition,
    HabitRecord,
};
pub use model::memory::MemoryEntry;
pub use model::mood::{mood_for, Mood, MoodFeedback};
pub use session::{SessionManager, SessionState};
pub use store::{KeyValueStore, SqliteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
