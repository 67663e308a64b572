//! Habit catalog and per-day completion records.
//!
//! # Responsibility
//! - Define the fixed habit catalog and the per-day record shape.
//! - Derive completion percentage from a record set.
//!
//! # Invariants
//! - Catalog ids are unique.
//! - A record set for a day mirrors the catalog ids exactly; no partial or
//!   extra entries are ever constructed here.

use serde::{Deserialize, Serialize};

/// Grouping used by the catalog; fixed, not user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    Health,
    Wellness,
    Learning,
    Social,
    Productivity,
}

/// Immutable catalog entry. The catalog is injected into components rather
/// than read from ambient state, so tests can run against small catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDefinition {
    pub id: String,
    pub label: String,
    pub category: HabitCategory,
}

impl HabitDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: HabitCategory) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
        }
    }
}

/// One habit's completion state for one `(user, day)` scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: String,
    pub label: String,
    pub category: HabitCategory,
    pub completed: bool,
}

impl HabitRecord {
    /// Builds the day-start record for a catalog entry.
    pub fn from_definition(definition: &HabitDefinition) -> Self {
        Self {
            id: definition.id.clone(),
            label: definition.label.clone(),
            category: definition.category,
            completed: false,
        }
    }
}

/// The product's fixed ten-habit catalog.
pub fn default_catalog() -> Vec<HabitDefinition> {
    use HabitCategory::{Health, Learning, Productivity, Social, Wellness};

    vec![
        HabitDefinition::new("exercise", "Exercise (30 min)", Health),
        HabitDefinition::new("water", "Drink 8 glasses of water", Health),
        HabitDefinition::new("reading", "Read for 20 minutes", Learning),
        HabitDefinition::new("meditation", "Meditate (10 min)", Wellness),
        HabitDefinition::new("sleep", "Sleep 7-8 hours", Health),
        HabitDefinition::new("gratitude", "Practice gratitude", Wellness),
        HabitDefinition::new("healthy-meal", "Eat healthy meals", Health),
        HabitDefinition::new("social", "Connect with loved ones", Social),
        HabitDefinition::new("learn", "Learn something new", Learning),
        HabitDefinition::new("organize", "Organize workspace", Productivity),
    ]
}

/// Builds a freshly-defaulted record set covering the whole catalog.
pub fn default_records(catalog: &[HabitDefinition]) -> Vec<HabitRecord> {
    catalog.iter().map(HabitRecord::from_definition).collect()
}

/// Percentage of completed records, rounded to the nearest integer.
///
/// An empty record set is defined as 0, never an arithmetic fault.
pub fn completion_percentage(records: &[HabitRecord]) -> u8 {
    if records.is_empty() {
        return 0;
    }
    let completed = records.iter().filter(|record| record.completed).count();
    ((completed as f64 / records.len() as f64) * 100.0).round() as u8
}
