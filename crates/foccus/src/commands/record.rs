use foccus_telemetry::{Heartbeat, Source};

pub fn run(
    file: &str,
    project: Option<String>,
    branch: Option<String>,
    source: Source,
    timestamp: Option<i64>,
) -> anyhow::Result<()> {
    let heartbeat = build(file, project, branch, source, timestamp);
    let mut store = super::open_store()?;

    if store.append(std::slice::from_ref(&heartbeat)) == 0 {
        anyhow::bail!("heartbeat for {} was not stored", heartbeat.file_path);
    }
    tracing::debug!(id = %heartbeat.id, file = %heartbeat.file_path, "recorded heartbeat");
    println!("{}", heartbeat.id);
    Ok(())
}

fn build(
    file: &str,
    project: Option<String>,
    branch: Option<String>,
    source: Source,
    timestamp: Option<i64>,
) -> Heartbeat {
    let timestamp = timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp());
    Heartbeat::new(
        uuid::Uuid::new_v4().to_string(),
        timestamp,
        file,
        project,
        branch,
        source,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_assigns_fresh_ids() {
        let a = build("src\\lib.rs", Some("foccus".into()), None, Source::Human, Some(10));
        let b = build("src\\lib.rs", Some("foccus".into()), None, Source::Human, Some(10));

        assert_ne!(a.id, b.id);
        assert_eq!(a.file_path, "src/lib.rs");
        assert_eq!(a.language, "rs");
        assert_eq!(a.timestamp, 10);
    }

    #[test]
    fn test_build_defaults_timestamp_to_now() {
        let before = chrono::Utc::now().timestamp();
        let hb = build("a.py", None, Some(" ".into()), Source::Ai, None);
        assert!(hb.timestamp >= before);
        assert_eq!(hb.branch, None);
    }
}
