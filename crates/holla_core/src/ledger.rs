//! Daily habit ledger.
//!
//! # Responsibility
//! - Own the habit completion records for one `(user, local day)` scope.
//! - Persist the whole record set after every mutation.
//!
//! # Invariants
//! - The record id set always equals the catalog id set; a stored value
//!   that violates this is treated as malformed and replaced by defaults.
//! - A load miss does not write; the first mutation does.
//! - `reset_if_absent` only ever skips a write when data already exists,
//!   never overwrites logged progress.

use crate::model::habit::{
    completion_percentage, default_records, HabitDefinition, HabitRecord,
};
use crate::store::{keys, KeyValueStore, StoreResult};
use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::HashSet;
use std::rc::Rc;

/// Habit records for the active user and calendar day.
///
/// The ledger key embeds the local calendar day, so an entry is implicitly
/// invalidated at local midnight when the key changes.
pub struct HabitLedger<S: KeyValueStore> {
    store: Rc<S>,
    catalog: Vec<HabitDefinition>,
    user_id: String,
    day: NaiveDate,
    records: Vec<HabitRecord>,
}

impl<S: KeyValueStore> HabitLedger<S> {
    /// Loads the ledger for `(user_id, day)`.
    ///
    /// A hit returns the stored records; a miss (or a malformed or
    /// catalog-mismatched value) constructs the default set without
    /// writing it back yet.
    pub fn load(
        store: Rc<S>,
        catalog: Vec<HabitDefinition>,
        user_id: &str,
        day: NaiveDate,
    ) -> StoreResult<Self> {
        let key = keys::ledger_key(user_id, day);
        let records = match store.get(&key)? {
            Some(raw) => parse_records(&raw, &catalog)
                .unwrap_or_else(|| default_records(&catalog)),
            None => default_records(&catalog),
        };

        debug!(
            "event=ledger_load module=ledger status=ok day={} records={}",
            day.format("%Y-%m-%d"),
            records.len()
        );

        Ok(Self {
            store,
            catalog,
            user_id: user_id.to_string(),
            day,
            records,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn records(&self) -> &[HabitRecord] {
        &self.records
    }

    /// Percentage of today's habits completed, rounded.
    pub fn completion_percentage(&self) -> u8 {
        completion_percentage(&self.records)
    }

    /// Flips exactly one record's `completed` flag and persists the set.
    ///
    /// An unknown id matches zero records: a logged no-op that does not
    /// rewrite storage. Returns the completion percentage after the call.
    pub fn toggle(&mut self, habit_id: &str) -> StoreResult<u8> {
        match self.records.iter_mut().find(|record| record.id == habit_id) {
            Some(record) => {
                record.completed = !record.completed;
                self.save()?;
            }
            None => {
                warn!("event=habit_toggle module=ledger status=noop reason=unknown_id id={habit_id}");
            }
        }
        Ok(self.completion_percentage())
    }

    /// Reinitializes today's records iff no persisted record exists.
    ///
    /// This is the check-then-act reaction to a reset signal: if another
    /// write raced in first the reset is a no-op, so progress already
    /// logged for the new day is never clobbered. Returns whether a reset
    /// was applied.
    pub fn reset_if_absent(&mut self) -> StoreResult<bool> {
        let key = keys::ledger_key(&self.user_id, self.day);
        if self.store.get(&key)?.is_some() {
            debug!("event=ledger_reset module=ledger status=noop reason=record_exists");
            return Ok(false);
        }

        self.records = default_records(&self.catalog);
        self.save()?;
        debug!("event=ledger_reset module=ledger status=ok");
        Ok(true)
    }

    fn save(&self) -> StoreResult<()> {
        let key = keys::ledger_key(&self.user_id, self.day);
        // serde_json can only fail here on non-string map keys or
        // non-finite floats; the record shape has neither.
        let raw = serde_json::to_string(&self.records).unwrap_or_default();
        self.store.set(&key, &raw)
    }
}

/// Parses a stored record set, enforcing the catalog invariant.
///
/// Returns `None` for unparsable JSON or an id set that no longer matches
/// the catalog; the caller falls back to defaults either way.
fn parse_records(raw: &str, catalog: &[HabitDefinition]) -> Option<Vec<HabitRecord>> {
    let records: Vec<HabitRecord> = match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(err) => {
            warn!("event=ledger_parse module=ledger status=fallback error={err}");
            return None;
        }
    };

    let stored_ids: HashSet<&str> = records.iter().map(|record| record.id.as_str()).collect();
    let catalog_ids: HashSet<&str> = catalog.iter().map(|habit| habit.id.as_str()).collect();
    if stored_ids != catalog_ids || records.len() != catalog.len() {
        warn!("event=ledger_parse module=ledger status=fallback reason=catalog_mismatch");
        return None;
    }

    Some(records)
}
