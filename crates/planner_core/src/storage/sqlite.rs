//! SQLite-backed key-value backend.
//!
//! # Invariants
//! - All entries live in `kv_entries`, one row per key.
//! - The table exists before the backend is handed out.
//! - `set` is an upsert and refreshes `updated_at`.
//! - Every open attempt emits one `db_open` start event and one outcome event.

use super::{KeyValueBackend, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_KV_ENTRIES: &str = "
CREATE TABLE IF NOT EXISTS kv_entries (
    key         TEXT PRIMARY KEY NOT NULL,
    value       TEXT NOT NULL,
    updated_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Durable backend over a single SQLite table.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with("file", || Connection::open(path))
    }

    /// Opens a private in-memory database; entries die with the backend.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    /// Number of stored keys.
    pub fn len(&self) -> StorageResult<usize> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    fn open_with(
        mode: &str,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=storage status=start mode={mode}");

        let conn = match connect().and_then(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn.execute_batch(CREATE_KV_ENTRIES)?;
            Ok(conn)
        }) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=storage status=error mode={mode} duration_ms={} error_code=db_open_failed error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        info!(
            "event=db_open module=storage status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(Self { conn })
    }
}

impl KeyValueBackend for SqliteBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
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

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv_entries;", [])?;
        Ok(())
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM kv_entries WHERE key = ?1);",
            [key],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(exists == 1)
    }
}
