//! Store schema migrations.
//!
//! # Responsibility
//! - Bring the backing database to the current schema before any
//!   application read or write.
//!
//! # Invariants
//! - The applied schema version is mirrored to `PRAGMA user_version`.
//! - A database written by a newer binary is rejected, never downgraded.

use crate::store::{StoreError, StoreResult};
use rusqlite::Connection;

/// Ordered migration scripts; index + 1 is the schema version.
const MIGRATIONS: &[&str] = &[include_str!("0001_kv.sql")];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let db_version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let latest = latest_version();

    if db_version > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: latest,
        });
    }
    if db_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (index, sql) in MIGRATIONS.iter().enumerate() {
        let version = index as u32 + 1;
        if version <= db_version {
            continue;
        }
        tx.execute_batch(sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {version};"))?;
    }
    tx.commit()?;

    Ok(())
}
