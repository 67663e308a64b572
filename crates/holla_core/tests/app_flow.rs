use chrono::{DateTime, Local, TimeZone};
use holla_core::store::keys;
use holla_core::{default_catalog, HollaApp, KeyValueStore, Mood, SessionState, SqliteStore};
use std::cell::Cell;
use std::rc::Rc;

fn boot() -> HollaApp<SqliteStore> {
    let store = Rc::new(SqliteStore::open_in_memory().unwrap());
    HollaApp::new(store, default_catalog()).unwrap()
}

#[test]
fn boot_starts_logged_out_with_idle_mood() {
    let app = boot();

    assert_eq!(app.session_state(), SessionState::NoIdentity);
    assert!(app.habit_records().is_empty());
    assert!(app.memories().is_empty());
    assert_eq!(app.mood().mood, Mood::Neutral);
}

#[test]
fn login_exposes_a_fresh_day() {
    let mut app = boot();
    assert!(app.login("Ana").unwrap());

    assert_eq!(app.session_state(), SessionState::Authenticated);
    assert_eq!(app.habit_records().len(), 10);
    assert_eq!(app.completion_percentage(), 0);
    assert_eq!(app.mood().mood, Mood::Encouraging);
}

#[test]
fn seven_of_ten_habits_reads_proud_and_fantastic() {
    let mut app = boot();
    app.login("Ana").unwrap();

    let ids: Vec<String> = app
        .habit_records()
        .iter()
        .take(7)
        .map(|record| record.id.clone())
        .collect();
    for id in &ids {
        app.toggle_habit(id).unwrap();
    }

    assert_eq!(app.completion_percentage(), 70);
    let feedback = app.mood();
    assert_eq!(feedback.mood, Mood::Proud);
    assert!(feedback.message.contains("fantastic"));
}

#[test]
fn completing_everything_reads_excited() {
    let mut app = boot();
    app.login("Ana").unwrap();

    let ids: Vec<String> = app
        .habit_records()
        .iter()
        .map(|record| record.id.clone())
        .collect();
    for id in &ids {
        app.toggle_habit(id).unwrap();
    }

    assert_eq!(app.completion_percentage(), 100);
    assert_eq!(app.mood().mood, Mood::Excited);
}

#[test]
fn adding_a_memory_resets_todays_habits_via_the_bus() {
    let mut app = boot();
    app.login("Ana").unwrap();

    app.toggle_habit("water").unwrap();
    app.toggle_habit("reading").unwrap();
    assert_eq!(app.completion_percentage(), 20);

    assert!(app.add_memory("Great day").unwrap());

    assert_eq!(app.memories().len(), 1);
    assert_eq!(app.memories()[0].text, "Great day");
    // The bus delivered the reset signal and the ledger resynchronized
    // from storage into a freshly-defaulted day.
    assert_eq!(app.completion_percentage(), 0);
    assert!(app.habit_records().iter().all(|record| !record.completed));
}

#[test]
fn whitespace_memory_changes_nothing() {
    let mut app = boot();
    app.login("Ana").unwrap();

    app.toggle_habit("water").unwrap();
    assert!(!app.add_memory("   ").unwrap());

    assert!(app.memories().is_empty());
    assert_eq!(app.completion_percentage(), 10);
}

#[test]
fn deleting_a_memory_does_not_reset_habits() {
    let mut app = boot();
    app.login("Ana").unwrap();

    app.add_memory("Great day").unwrap();
    app.toggle_habit("water").unwrap();

    let id = app.memories()[0].id;
    assert!(app.delete_memory(id).unwrap());
    assert!(!app.delete_memory(id).unwrap());

    assert!(app.memories().is_empty());
    assert_eq!(app.completion_percentage(), 10);
}

#[test]
fn logout_keeps_identity_and_hides_user_state() {
    let mut app = boot();
    app.login("Ana").unwrap();
    app.toggle_habit("water").unwrap();

    app.logout();

    assert_eq!(app.session_state(), SessionState::RememberedUnauthenticated);
    assert_eq!(app.remembered_user(), Some("Ana"));
    assert!(app.habit_records().is_empty());
    assert_eq!(app.mood().mood, Mood::Neutral);

    // Intents are no-ops while logged out.
    assert_eq!(app.toggle_habit("water").unwrap(), 0);
    assert!(!app.add_memory("unseen").unwrap());
    assert!(!app.delete_memory(1).unwrap());
}

#[test]
fn progress_survives_logout_and_login() {
    let mut app = boot();
    app.login("Ana").unwrap();
    app.toggle_habit("water").unwrap();

    app.logout();
    app.login("Ana").unwrap();

    assert_eq!(app.completion_percentage(), 10);
}

#[test]
fn users_see_only_their_own_state() {
    let mut app = boot();

    app.login("Ana").unwrap();
    app.toggle_habit("water").unwrap();
    app.add_memory("ana's note").unwrap();

    app.login("Ben").unwrap();
    assert_eq!(app.completion_percentage(), 0);
    assert!(app.memories().is_empty());
    assert_eq!(app.remembered_user(), Some("Ben"));
}

#[test]
fn rejected_login_leaves_session_untouched() {
    let mut app = boot();

    assert!(!app.login("   ").unwrap());
    assert_eq!(app.session_state(), SessionState::NoIdentity);
}

#[test]
fn roll_day_is_a_noop_within_the_same_day() {
    let mut app = boot();
    app.login("Ana").unwrap();
    app.toggle_habit("water").unwrap();

    assert!(!app.roll_day_if_needed().unwrap());
    assert_eq!(app.completion_percentage(), 10);
}

fn boot_at(now: Rc<Cell<DateTime<Local>>>) -> (HollaApp<SqliteStore>, Rc<SqliteStore>) {
    let store = Rc::new(SqliteStore::open_in_memory().unwrap());
    let clock_now = Rc::clone(&now);
    let app = HollaApp::with_clock(
        Rc::clone(&store),
        default_catalog(),
        Box::new(move || clock_now.get()),
    )
    .unwrap();
    (app, store)
}

#[test]
fn midnight_rollover_loads_a_fresh_day() {
    let now = Rc::new(Cell::new(
        Local.with_ymd_and_hms(2025, 3, 9, 23, 50, 0).unwrap(),
    ));
    let (mut app, store) = boot_at(Rc::clone(&now));

    app.login("Ana").unwrap();
    app.toggle_habit("water").unwrap();
    assert_eq!(app.completion_percentage(), 10);

    now.set(Local.with_ymd_and_hms(2025, 3, 10, 0, 5, 0).unwrap());
    assert!(app.roll_day_if_needed().unwrap());

    assert_eq!(app.completion_percentage(), 0);
    assert!(app.habit_records().iter().all(|record| !record.completed));
    // Yesterday's record is superseded, not deleted.
    let yesterday = keys::ledger_key("Ana", now.get().date_naive().pred_opt().unwrap());
    assert!(store.get(&yesterday).unwrap().is_some());
}

#[test]
fn reset_subscription_stays_live_across_rollover() {
    let now = Rc::new(Cell::new(
        Local.with_ymd_and_hms(2025, 3, 9, 23, 50, 0).unwrap(),
    ));
    let (mut app, _store) = boot_at(Rc::clone(&now));
    app.login("Ana").unwrap();

    now.set(Local.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());
    app.toggle_habit("water").unwrap();
    assert_eq!(app.completion_percentage(), 10);

    // The ledger swapped in at rollover must still hear the reset signal.
    assert!(app.add_memory("new day, new page").unwrap());
    assert_eq!(app.completion_percentage(), 0);
    assert!(app.habit_records().iter().all(|record| !record.completed));
}

#[test]
fn intents_roll_the_day_on_their_own() {
    let now = Rc::new(Cell::new(
        Local.with_ymd_and_hms(2025, 3, 9, 23, 50, 0).unwrap(),
    ));
    let (mut app, _store) = boot_at(Rc::clone(&now));

    app.login("Ana").unwrap();
    app.toggle_habit("water").unwrap();

    // No explicit roll call: the next toggle lands on the new day's
    // fresh default set.
    now.set(Local.with_ymd_and_hms(2025, 3, 10, 0, 5, 0).unwrap());
    assert_eq!(app.toggle_habit("reading").unwrap(), 10);
    let records = app.habit_records();
    let completed: Vec<&str> = records
        .iter()
        .filter(|record| record.completed)
        .map(|record| record.id.as_str())
        .collect();
    assert_eq!(completed, vec!["reading"]);
}
