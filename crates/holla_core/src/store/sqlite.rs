//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Open file or in-memory store connections.
//! - Apply schema migrations before any application read/write.
//! - Implement the `KeyValueStore` contract over one `kv_entries` table.
//!
//! # Invariants
//! - Returned stores have migrations fully applied.
//! - `set` upserts; a key holds at most one value.

use super::migrations::apply_migrations;
use super::{KeyValueStore, StoreResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Durable store backed by a single SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens a store file and applies all pending migrations.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=file");

        let conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match Self::bootstrap(conn) {
            Ok(store) => {
                info!(
                    "event=store_open module=store status=ok mode=file duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens an in-memory store and applies all pending migrations.
    ///
    /// State is lost on drop; intended for tests and smoke probes.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self::bootstrap(conn)?;
        info!("event=store_open module=store status=ok mode=memory");
        Ok(store)
    }

    fn bootstrap(mut conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}
