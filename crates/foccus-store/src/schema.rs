//! Versioned schema for the heartbeat store.
//!
//! Version 0 is the legacy layout that carried `editor`, `os` and `sent`
//! columns and had no `source`. Version 1 is current. The version lives in
//! `PRAGMA user_version`.

use crate::error::{Result, StoreError};
use rusqlite::Connection;

pub const SCHEMA_VERSION: u32 = 1;

/// `auto_vacuum` must be set before the first table is created; it makes
/// commits hand freed pages back to the filesystem.
const CREATE_TABLES: &str = "
PRAGMA auto_vacuum = FULL;

CREATE TABLE IF NOT EXISTS heartbeats (
    id TEXT PRIMARY KEY,
    timestamp INTEGER NOT NULL,
    filePath TEXT NOT NULL,
    language TEXT NOT NULL,
    project TEXT,
    branch TEXT,
    source TEXT NOT NULL CHECK (source IN ('human', 'ai', 'debugging'))
);
CREATE INDEX IF NOT EXISTS idx_heartbeats_timestamp ON heartbeats(timestamp);

PRAGMA user_version = 1;
";

const MIGRATE_FROM_LEGACY: &str = "
BEGIN;
ALTER TABLE heartbeats RENAME TO heartbeats_legacy;
CREATE TABLE heartbeats (
    id TEXT PRIMARY KEY,
    timestamp INTEGER NOT NULL,
    filePath TEXT NOT NULL,
    language TEXT NOT NULL,
    project TEXT,
    branch TEXT,
    source TEXT NOT NULL CHECK (source IN ('human', 'ai', 'debugging'))
);
CREATE INDEX IF NOT EXISTS idx_heartbeats_timestamp ON heartbeats(timestamp);
INSERT OR IGNORE INTO heartbeats (id, timestamp, filePath, language, project, branch, source)
    SELECT id, timestamp, filePath, COALESCE(language, ''), project, branch, 'human'
    FROM heartbeats_legacy;
DROP TABLE heartbeats_legacy;
PRAGMA user_version = 1;
COMMIT;
";

/// How the store came to be in its current state when opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrigin {
    /// Empty schema created on open
    Fresh,
    /// Existing current-version store
    Loaded,
    /// Legacy store upgraded in place
    Migrated,
}

fn user_version(conn: &Connection) -> Result<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

fn heartbeat_columns(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('heartbeats')")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(columns)
}

/// Bring the database at `conn` up to [`SCHEMA_VERSION`]
pub fn initialize(conn: &Connection) -> Result<StoreOrigin> {
    match user_version(conn)? {
        SCHEMA_VERSION => Ok(StoreOrigin::Loaded),
        0 => {
            let columns = heartbeat_columns(conn)?;
            if columns.is_empty() {
                conn.execute_batch(CREATE_TABLES)?;
                Ok(StoreOrigin::Fresh)
            } else if columns.iter().any(|c| c == "source") {
                // current layout written without a version stamp
                conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
                Ok(StoreOrigin::Loaded)
            } else {
                migrate_legacy(conn)?;
                Ok(StoreOrigin::Migrated)
            }
        }
        other => Err(StoreError::UnsupportedSchema(other)),
    }
}

fn migrate_legacy(conn: &Connection) -> Result<()> {
    if let Err(e) = conn.execute_batch(MIGRATE_FROM_LEGACY) {
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(e.into());
    }
    // switching auto_vacuum on an existing file only takes effect after VACUUM
    conn.execute_batch("PRAGMA auto_vacuum = FULL; VACUUM;")?;
    tracing::info!("migrated legacy heartbeat store to schema v{}", SCHEMA_VERSION);
    Ok(())
}
