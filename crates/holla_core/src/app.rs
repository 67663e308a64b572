//! Composition root wiring session, ledger, journal and bus.
//!
//! # Responsibility
//! - Receive UI intents and forward them to the owning component.
//! - Expose the observables the rendering layer subscribes to.
//! - Recompute derived progress/mood explicitly after each mutation; there
//!   is no reactive dependency tracking anywhere in the core.
//!
//! # Invariants
//! - The journal write lands before the reset signal is broadcast.
//! - The ledger's reset subscription lives exactly as long as the active
//!   user context; logout unsubscribes.

use crate::bus::{EventBus, SubscriptionId, Topic};
use crate::journal::MemoryJournal;
use crate::ledger::HabitLedger;
use crate::model::habit::{HabitDefinition, HabitRecord};
use crate::model::memory::MemoryEntry;
use crate::model::mood::{mood_for, MoodFeedback};
use crate::session::{SessionManager, SessionState};
use crate::store::{KeyValueStore, StoreResult};
use chrono::{DateTime, Local, NaiveDate};
use log::{error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Time source the app derives "now" and the local calendar day from.
///
/// Injected like the catalog so tests can cross a day boundary without
/// waiting for midnight.
pub type Clock = Box<dyn Fn() -> DateTime<Local>>;

/// Per-login context owning the day-scoped ledger and the user's journal.
struct ActiveContext<S: KeyValueStore> {
    ledger: Rc<RefCell<HabitLedger<S>>>,
    journal: MemoryJournal<S>,
    reset_subscription: SubscriptionId,
}

/// The application core behind the rendering layer.
///
/// All state mutation flows through the intent methods; observables return
/// plain values the UI re-renders from.
pub struct HollaApp<S: KeyValueStore + 'static> {
    store: Rc<S>,
    catalog: Vec<HabitDefinition>,
    session: SessionManager<S>,
    bus: EventBus,
    clock: Clock,
    active: Option<ActiveContext<S>>,
}

impl<S: KeyValueStore + 'static> HollaApp<S> {
    /// Boots the core: reads the remembered identity, starts with no
    /// authenticated user.
    pub fn new(store: Rc<S>, catalog: Vec<HabitDefinition>) -> StoreResult<Self> {
        Self::with_clock(store, catalog, Box::new(Local::now))
    }

    /// Boots the core with an explicit time source.
    pub fn with_clock(
        store: Rc<S>,
        catalog: Vec<HabitDefinition>,
        clock: Clock,
    ) -> StoreResult<Self> {
        let session = SessionManager::load(Rc::clone(&store))?;
        Ok(Self {
            store,
            catalog,
            session,
            bus: EventBus::new(),
            clock,
            active: None,
        })
    }

    // ---- UI intents -----------------------------------------------------

    /// Completes a login: remembers the identity and loads the user's
    /// ledger for today plus their journal.
    ///
    /// Returns `Ok(false)` when the user id is rejected (whitespace-only).
    pub fn login(&mut self, user_id: &str) -> StoreResult<bool> {
        if !self.session.login_success(user_id)? {
            return Ok(false);
        }

        self.teardown_active();
        let user_id = self
            .session
            .remembered_user()
            .unwrap_or_default()
            .to_string();
        let today = (self.clock)().date_naive();

        let ledger = Rc::new(RefCell::new(HabitLedger::load(
            Rc::clone(&self.store),
            self.catalog.clone(),
            &user_id,
            today,
        )?));
        let journal = MemoryJournal::load(Rc::clone(&self.store), &user_id)?;

        // The ledger listens for reset signals and resynchronizes from the
        // store; lost signals are fine because its load path re-derives.
        let listener = Rc::clone(&ledger);
        let reset_subscription = self.bus.subscribe(
            Topic::HabitsReset,
            Box::new(move || {
                if let Err(err) = listener.borrow_mut().reset_if_absent() {
                    error!("event=ledger_reset module=app status=error error={err}");
                }
            }),
        );

        self.active = Some(ActiveContext {
            ledger,
            journal,
            reset_subscription,
        });
        Ok(true)
    }

    /// Drops authentication. The remembered identity is untouched, so the
    /// next launch prompts the same user to re-authenticate.
    pub fn logout(&mut self) {
        self.session.logout();
        self.teardown_active();
    }

    /// Flips one habit's completion state.
    ///
    /// Unknown ids and logged-out calls are no-ops. Returns the completion
    /// percentage after the call.
    pub fn toggle_habit(&mut self, habit_id: &str) -> StoreResult<u8> {
        let today = (self.clock)().date_naive();
        self.ensure_day(today)?;
        match &self.active {
            Some(active) => active.ledger.borrow_mut().toggle(habit_id),
            None => {
                warn!("event=habit_toggle module=app status=noop reason=no_active_user");
                Ok(0)
            }
        }
    }

    /// Appends a memory and, when accepted, broadcasts the reset signal
    /// after the journal write and ledger-key clear are durable.
    ///
    /// Returns whether an entry was added (whitespace-only text is not).
    pub fn add_memory(&mut self, text: &str) -> StoreResult<bool> {
        let now = (self.clock)();
        self.ensure_day(now.date_naive())?;
        let Some(active) = self.active.as_mut() else {
            warn!("event=memory_add module=app status=noop reason=no_active_user");
            return Ok(false);
        };

        if active.journal.add(text, now)?.is_none() {
            return Ok(false);
        }
        self.bus.publish(Topic::HabitsReset);
        Ok(true)
    }

    /// Deletes a memory by id; absent ids are a no-op.
    pub fn delete_memory(&mut self, id: i64) -> StoreResult<bool> {
        match self.active.as_mut() {
            Some(active) => active.journal.delete(id),
            None => {
                warn!("event=memory_delete module=app status=noop reason=no_active_user");
                Ok(false)
            }
        }
    }

    /// Reloads the ledger when the local calendar day changed under a
    /// long-running session. Returns whether a rollover happened.
    pub fn roll_day_if_needed(&mut self) -> StoreResult<bool> {
        let today = (self.clock)().date_naive();
        self.ensure_day(today)
    }

    // ---- Observables ----------------------------------------------------

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn remembered_user(&self) -> Option<&str> {
        self.session.remembered_user()
    }

    /// Today's habit records for the active user; empty when logged out.
    pub fn habit_records(&self) -> Vec<HabitRecord> {
        match &self.active {
            Some(active) => active.ledger.borrow().records().to_vec(),
            None => Vec::new(),
        }
    }

    pub fn completion_percentage(&self) -> u8 {
        match &self.active {
            Some(active) => active.ledger.borrow().completion_percentage(),
            None => 0,
        }
    }

    /// Mood feedback for the current progress; the logged-out idle mood
    /// when no user is active.
    pub fn mood(&self) -> MoodFeedback {
        match &self.active {
            Some(_) => mood_for(self.completion_percentage()),
            None => MoodFeedback::idle(),
        }
    }

    /// The active user's memories, newest first; empty when logged out.
    pub fn memories(&self) -> Vec<MemoryEntry> {
        match &self.active {
            Some(active) => active.journal.entries().to_vec(),
            None => Vec::new(),
        }
    }

    // ---- Internals ------------------------------------------------------

    fn teardown_active(&mut self) {
        if let Some(active) = self.active.take() {
            self.bus.unsubscribe(active.reset_subscription);
        }
    }

    /// Swaps in a fresh ledger when `today` differs from the loaded day.
    ///
    /// The ledger instance is replaced in place so the bus subscription,
    /// which holds the same cell, keeps pointing at live state.
    fn ensure_day(&mut self, today: NaiveDate) -> StoreResult<bool> {
        let Some(active) = self.active.as_ref() else {
            return Ok(false);
        };

        let loaded_day = active.ledger.borrow().day();
        if loaded_day == today {
            return Ok(false);
        }

        let user_id = active.journal.user_id().to_string();
        let reloaded = HabitLedger::load(
            Rc::clone(&self.store),
            self.catalog.clone(),
            &user_id,
            today,
        )?;
        *active.ledger.borrow_mut() = reloaded;
        info!(
            "event=day_rollover module=app status=ok day={}",
            today.format("%Y-%m-%d")
        );
        Ok(true)
    }
}
