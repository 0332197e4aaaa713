use anyhow::Context;
use foccus_store::{StoreOrigin, BYTES_PER_MB};
use foccus_telemetry::{Paths, Settings};

pub fn run_info() -> anyhow::Result<()> {
    println!("{}", info(&Paths::new()?)?);
    Ok(())
}

pub fn run_set_ceiling(mb: &str) -> anyhow::Result<()> {
    let applied = set_ceiling(&Paths::new()?, mb)?;
    println!("Ceiling set to {applied} MB");
    Ok(())
}

pub fn run_clear() -> anyhow::Result<()> {
    clear(&Paths::new()?)?;
    println!("Cleared all heartbeats");
    Ok(())
}

fn info(paths: &Paths) -> anyhow::Result<String> {
    let store = super::open_store_at(paths)?;
    let origin = match store.origin() {
        StoreOrigin::Fresh => "new",
        StoreOrigin::Loaded => "existing",
        StoreOrigin::Migrated => "migrated from legacy layout",
    };

    Ok(format!(
        "Store: {} ({origin})\nHeartbeats: {}\nSize: {:.2} MB of {} MB",
        store.path().display(),
        store.count()?,
        store.size_bytes() as f64 / BYTES_PER_MB as f64,
        store.ceiling_mb()
    ))
}

/// Apply a ceiling and persist the clamped value. Unparseable input falls
/// back to the default ceiling.
fn set_ceiling(paths: &Paths, requested: &str) -> anyhow::Result<u64> {
    let requested_mb = requested.trim().parse::<f64>().unwrap_or(f64::NAN);

    let mut store = super::open_store_at(paths)?;
    let applied = store.set_ceiling_mb(requested_mb);

    let settings = Settings {
        ceiling_mb: applied as f64,
    };
    settings
        .save(&paths.settings_file())
        .context("saving settings")?;
    Ok(applied)
}

fn clear(paths: &Paths) -> anyhow::Result<()> {
    let mut store = super::open_store_at(paths)?;
    store.clear_all().context("clearing heartbeat store")?;
    Ok(())
}
