//! Memory journal.
//!
//! # Responsibility
//! - Own one user's ordered list of free-text memory entries.
//! - Clear today's ledger key when a memory is added (the one sanctioned
//!   cross-namespace effect).
//!
//! # Invariants
//! - Entries are ordered newest first; the whole list is rewritten on
//!   every mutation.
//! - Entry ids are strictly increasing within a runtime session.
//! - The journal value is durably persisted *before* the ledger key is
//!   cleared, so any listener re-reading storage sees a consistent pair.

use crate::model::memory::MemoryEntry;
use crate::store::{keys, KeyValueStore, StoreResult};
use chrono::{DateTime, Local};
use log::{debug, warn};
use std::rc::Rc;

/// Ordered journal of one user's memories.
pub struct MemoryJournal<S: KeyValueStore> {
    store: Rc<S>,
    user_id: String,
    entries: Vec<MemoryEntry>,
    last_id: i64,
}

impl<S: KeyValueStore> MemoryJournal<S> {
    /// Loads the journal for `user_id`, falling back to an empty list when
    /// the stored value is missing or malformed.
    pub fn load(store: Rc<S>, user_id: &str) -> StoreResult<Self> {
        let key = keys::journal_key(user_id);
        let entries = match store.get(&key)? {
            Some(raw) => match serde_json::from_str::<Vec<MemoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("event=journal_parse module=journal status=fallback error={err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let last_id = entries.iter().map(|entry| entry.id).max().unwrap_or(0);
        Ok(Self {
            store,
            user_id: user_id.to_string(),
            entries,
            last_id,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    /// Adds a memory captured at `now`.
    ///
    /// Whitespace-only text is rejected as a silent no-op (`Ok(None)`).
    /// On success the full list is persisted, then today's ledger key for
    /// this user is removed; the caller broadcasts the reset signal after
    /// this returns. Returns the new entry's id.
    pub fn add(&mut self, text: &str, now: DateTime<Local>) -> StoreResult<Option<i64>> {
        let text = text.trim();
        if text.is_empty() {
            debug!("event=memory_add module=journal status=noop reason=empty_text");
            return Ok(None);
        }

        // Time-based token, bumped when two adds land in the same
        // millisecond so ids stay strictly increasing.
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;

        self.entries.insert(
            0,
            MemoryEntry {
                id,
                text: text.to_string(),
                date: now.format("%Y-%m-%d").to_string(),
                timestamp: now.format("%H:%M:%S").to_string(),
            },
        );

        self.save()?;
        self.store
            .remove(&keys::ledger_key(&self.user_id, now.date_naive()))?;
        debug!(
            "event=memory_add module=journal status=ok entries={}",
            self.entries.len()
        );
        Ok(Some(id))
    }

    /// Removes the entry with `id` and persists the reduced list.
    ///
    /// An absent id is a no-op, not an error, and skips the write.
    pub fn delete(&mut self, id: i64) -> StoreResult<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            debug!("event=memory_delete module=journal status=noop reason=unknown_id");
            return Ok(false);
        }

        self.save()?;
        debug!(
            "event=memory_delete module=journal status=ok entries={}",
            self.entries.len()
        );
        Ok(true)
    }

    fn save(&self) -> StoreResult<()> {
        let key = keys::journal_key(&self.user_id);
        // serde_json can only fail here on non-string map keys or
        // non-finite floats; the entry shape has neither.
        let raw = serde_json::to_string(&self.entries).unwrap_or_default();
        self.store.set(&key, &raw)
    }
}
