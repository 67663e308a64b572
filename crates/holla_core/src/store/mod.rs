//! Durable key-value storage boundary.
//!
//! # Responsibility
//! - Define the synchronous string-keyed store contract every owning
//!   component persists through.
//! - Keep SQLite details behind the adapter boundary.
//!
//! # Invariants
//! - Store operations are synchronous and run to completion.
//! - A malformed stored *value* is never an error at this layer; readers
//!   fall back to default construction instead.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod keys;
pub mod migrations;
mod sqlite;

pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage transport errors.
///
/// Value-level corruption is deliberately absent here: readers recover
/// from unparsable values locally (see §`ledger`/`journal` load paths).
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Contract over a synchronous, string-keyed, string-valued durable store.
///
/// Mirrors the browser-origin persistent store the product runs against:
/// no expiry, no transactions across keys, durable across restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}
