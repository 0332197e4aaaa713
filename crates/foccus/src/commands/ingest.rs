use foccus_telemetry::{read_jsonl, read_jsonl_from, Heartbeat};
use std::path::Path;

pub fn run(file: Option<&str>) -> anyhow::Result<()> {
    let raw: Vec<Heartbeat> = match file {
        Some(path) => read_jsonl(Path::new(path))?,
        None => read_jsonl_from(std::io::stdin().lock())?,
    };

    let batch = prepare(raw);
    let mut store = super::open_store()?;
    let inserted = store.append(&batch);

    println!("Ingested {} of {} heartbeats", inserted, batch.len());
    Ok(())
}

/// Normalize paths, derive languages and fill in missing or blank ids
fn prepare(raw: Vec<Heartbeat>) -> Vec<Heartbeat> {
    raw.into_iter()
        .map(|hb| {
            let id = if hb.id.trim().is_empty() {
                uuid::Uuid::new_v4().to_string()
            } else {
                hb.id
            };
            let mut normalized =
                Heartbeat::new(id, hb.timestamp, &hb.file_path, hb.project, hb.branch, hb.source);
            if normalized.language.is_empty() {
                normalized.language = hb.language;
            }
            normalized
        })
        .collect()
}
