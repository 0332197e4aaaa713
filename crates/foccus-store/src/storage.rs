use crate::config::{StoreConfig, BYTES_PER_MB};
use crate::error::{Result, StoreError};
use crate::schema::{self, StoreOrigin};
use foccus_telemetry::{Heartbeat, Source};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

const SELECT_COLUMNS: &str =
    "SELECT id, timestamp, filePath, language, project, branch, source FROM heartbeats";

/// Outcome of one ceiling enforcement pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvictionReport {
    pub rounds: usize,
    pub evicted: usize,
    pub size_bytes: u64,
}

/// The authoritative heartbeat table.
///
/// Created once by the host and passed by reference to every collaborator.
/// Every mutating call commits before it returns, so later reads observe it.
/// Write failures are logged and leave the store as it was; only
/// [`HeartbeatStore::clear_all`] reports a consistency failure to the caller.
pub struct HeartbeatStore {
    path: PathBuf,
    conn: Connection,
    config: StoreConfig,
    ceiling_mb: u64,
    origin: StoreOrigin,
}

impl HeartbeatStore {
    /// Open (or create) the store at `path` under the default ceiling
    pub fn open(path: &Path, config: StoreConfig) -> Result<Self> {
        let ceiling_mb = config.default_ceiling_mb as f64;
        Self::open_with_ceiling(path, config, ceiling_mb)
    }

    /// Open (or create) the store at `path` and enforce `ceiling_mb`, clamped
    /// into the configured range. Nothing is evicted against any other ceiling.
    pub fn open_with_ceiling(path: &Path, config: StoreConfig, ceiling_mb: f64) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let origin = schema::initialize(&conn)?;
        let ceiling_mb = config.clamp_ceiling_mb(ceiling_mb);

        let mut store = Self {
            path: path.to_path_buf(),
            conn,
            config,
            ceiling_mb,
            origin,
        };
        tracing::debug!(
            path = %store.path.display(),
            ?origin,
            ceiling_mb,
            "opened heartbeat store"
        );
        store.enforce_ceiling();
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> StoreOrigin {
        self.origin
    }

    pub fn ceiling_mb(&self) -> u64 {
        self.ceiling_mb
    }

    pub fn ceiling_bytes(&self) -> u64 {
        self.ceiling_mb * BYTES_PER_MB
    }

    /// Insert heartbeats, ignoring ids that already exist, then enforce the
    /// ceiling. Returns the number of rows actually inserted.
    pub fn append(&mut self, batch: &[Heartbeat]) -> usize {
        let inserted = match self.insert_batch(batch) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, batch = batch.len(), "failed to append heartbeats");
                0
            }
        };
        self.enforce_ceiling();
        inserted
    }

    fn insert_batch(&mut self, batch: &[Heartbeat]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO heartbeats
                     (id, timestamp, filePath, language, project, branch, source)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for hb in batch {
                inserted += stmt.execute(params![
                    hb.id,
                    hb.timestamp,
                    hb.file_path,
                    hb.language,
                    hb.project,
                    hb.branch,
                    hb.source.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Remove rows by id; unknown ids are ignored. Returns rows removed.
    pub fn delete_by_ids(&mut self, ids: &[String]) -> usize {
        match self.delete_batch(ids) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, ids = ids.len(), "failed to delete heartbeats");
                0
            }
        }
    }

    fn delete_batch(&mut self, ids: &[String]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut deleted = 0;
        {
            let mut stmt = tx.prepare_cached("DELETE FROM heartbeats WHERE id = ?1")?;
            for id in ids {
                deleted += stmt.execute(params![id])?;
            }
        }
        tx.commit()?;
        Ok(deleted)
    }

    /// All heartbeats, oldest first
    pub fn query_all(&self) -> Result<Vec<Heartbeat>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY timestamp ASC, rowid ASC"))?;
        let rows = stmt.query_map([], Self::row_to_heartbeat)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Heartbeats with `timestamp >= since`, oldest first
    pub fn query_after(&self, since: i64) -> Result<Vec<Heartbeat>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE timestamp >= ?1 ORDER BY timestamp ASC, rowid ASC"
        ))?;
        let rows = stmt.query_map(params![since], Self::row_to_heartbeat)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM heartbeats", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Size of the database file on disk
    pub fn size_bytes(&self) -> u64 {
        std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    /// Clamp and apply a new ceiling, then enforce it. Returns the applied MB.
    pub fn set_ceiling_mb(&mut self, requested: f64) -> u64 {
        self.ceiling_mb = self.config.clamp_ceiling_mb(requested);
        tracing::debug!(ceiling_mb = self.ceiling_mb, requested, "ceiling updated");
        self.enforce_ceiling();
        self.ceiling_mb
    }

    /// Delete the oldest rows until the file fits under the ceiling.
    ///
    /// Bounded by `max_eviction_rounds`; stops early when a round deletes
    /// nothing (table already empty).
    pub fn enforce_ceiling(&mut self) -> EvictionReport {
        let ceiling = self.ceiling_bytes();
        let mut report = EvictionReport {
            size_bytes: self.size_bytes(),
            ..Default::default()
        };

        while report.size_bytes > ceiling && report.rounds < self.config.max_eviction_rounds {
            report.rounds += 1;
            let batch = self.eviction_batch(report.size_bytes, ceiling);
            match self.delete_oldest(batch) {
                Ok(0) => break,
                Ok(n) => report.evicted += n,
                Err(e) => {
                    tracing::warn!(error = %e, "eviction round failed");
                    break;
                }
            }
            report.size_bytes = self.size_bytes();
        }

        if report.evicted > 0 {
            tracing::debug!(
                rounds = report.rounds,
                evicted = report.evicted,
                size_bytes = report.size_bytes,
                ceiling_bytes = ceiling,
                "evicted oldest heartbeats"
            );
        }
        report
    }

    /// Rows to drop this round: the configured batch, or a share of the table
    /// proportional to the overage when that is larger
    fn eviction_batch(&self, size_bytes: u64, ceiling_bytes: u64) -> usize {
        let rows = self.count().unwrap_or(0);
        if rows == 0 || size_bytes == 0 {
            return self.config.eviction_batch;
        }
        let overage = size_bytes.saturating_sub(ceiling_bytes) as u128;
        let proportional = (rows as u128 * overage).div_ceil(size_bytes as u128) as usize;
        proportional.max(self.config.eviction_batch)
    }

    fn delete_oldest(&mut self, limit: usize) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute(
            "DELETE FROM heartbeats WHERE id IN (
                SELECT id FROM heartbeats ORDER BY timestamp ASC, rowid ASC LIMIT ?1
             )",
            params![limit as i64],
        )?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Delete every heartbeat and compact the file down to the empty schema.
    ///
    /// Runs on the live connection, so a failed attempt leaves the store as it
    /// was. Fails with [`StoreError::ClearIncomplete`] if rows survive a retry.
    pub fn clear_all(&mut self) -> Result<()> {
        self.truncate()?;
        let mut remaining = self.count()?;
        if remaining > 0 {
            tracing::warn!(remaining, "heartbeats survived clear, retrying");
            self.truncate()?;
            remaining = self.count()?;
        }

        if remaining > 0 {
            return Err(StoreError::ClearIncomplete { remaining });
        }
        tracing::info!(path = %self.path.display(), "cleared heartbeat store");
        Ok(())
    }

    fn truncate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM heartbeats", [])?;
        tx.commit()?;
        // VACUUM cannot run inside a transaction
        self.conn.execute_batch("VACUUM;")?;
        Ok(())
    }

    /// Close the underlying connection
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }

    fn row_to_heartbeat(row: &rusqlite::Row) -> rusqlite::Result<Heartbeat> {
        let source: String = row.get(6)?;
        let source = source.parse::<Source>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Heartbeat {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            file_path: row.get(2)?,
            language: row.get(3)?,
            project: row.get(4)?,
            branch: row.get(5)?,
            source,
        })
    }
}
