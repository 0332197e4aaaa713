pub mod db;
pub mod ingest;
pub mod record;
pub mod report;
pub mod status;
pub mod totals;
pub mod version;

use anyhow::Context;
use foccus_store::{HeartbeatStore, StoreConfig};
use foccus_telemetry::{Paths, Settings};

pub const EMPTY_MESSAGE: &str = "No heartbeats recorded yet.";

/// Open the store under `paths` with the persisted ceiling applied
pub fn open_store_at(paths: &Paths) -> anyhow::Result<HeartbeatStore> {
    paths
        .ensure_root()
        .with_context(|| format!("creating {}", paths.root.display()))?;

    let settings = Settings::load(&paths.settings_file());
    let store_file = paths.store_file();
    HeartbeatStore::open_with_ceiling(&store_file, StoreConfig::new(), settings.ceiling_mb)
        .with_context(|| format!("opening {}", store_file.display()))
}

pub fn open_store() -> anyhow::Result<HeartbeatStore> {
    open_store_at(&Paths::new()?)
}

/// Every stored heartbeat under `paths`, or `None` when the store cannot be read
pub fn load_all_at(paths: &Paths) -> Option<Vec<foccus_telemetry::Heartbeat>> {
    match open_store_at(paths).and_then(|store| Ok(store.query_all()?)) {
        Ok(heartbeats) => Some(heartbeats),
        Err(e) => {
            tracing::warn!("could not read heartbeat store: {e:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foccus_store::BYTES_PER_MB;
    use foccus_telemetry::{Heartbeat, Source};
    use tempfile::TempDir;

    #[test]
    fn test_open_store_applies_saved_ceiling_before_eviction() {
        let temp = TempDir::new().unwrap();
        let paths = Paths::with_root(temp.path());
        Settings { ceiling_mb: 100.0 }
            .save(&paths.settings_file())
            .unwrap();

        let long_dir = "workspace/packages/feature/components/".repeat(10);
        let batch: Vec<Heartbeat> = (0..60_000)
            .map(|i| {
                Heartbeat::new(
                    format!("hb-{i:06}"),
                    1_700_000_000 + i,
                    &format!("{long_dir}component_{i}.tsx"),
                    Some("frontend".into()),
                    Some("main".into()),
                    Source::Human,
                )
            })
            .collect();

        let mut store = open_store_at(&paths).unwrap();
        assert_eq!(store.ceiling_mb(), 100);
        assert_eq!(store.append(&batch), batch.len());
        assert!(store.size_bytes() > 20 * BYTES_PER_MB, "store must exceed the default ceiling");
        store.close().unwrap();

        let store = open_store_at(&paths).unwrap();
        assert_eq!(store.ceiling_mb(), 100);
        assert_eq!(store.count().unwrap(), batch.len() as u64);
    }
}
