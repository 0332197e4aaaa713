#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use foccus_telemetry::{append_jsonl, Heartbeat, Source};
use std::path::Path;

/// Wednesday afternoon, mid-month
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0).unwrap()
}

pub fn at(day: u32, hour: u32, minute: u32, second: u32) -> i64 {
    Utc.with_ymd_and_hms(2026, 10, day, hour, minute, second)
        .unwrap()
        .timestamp()
}

pub fn heartbeat(id: &str, timestamp: i64, path: &str, project: Option<&str>) -> Heartbeat {
    Heartbeat::new(
        id,
        timestamp,
        path,
        project.map(String::from),
        Some("main".to_string()),
        Source::Human,
    )
}

/// A session last Tuesday, one on Monday and one today
pub fn sample_heartbeats() -> Vec<Heartbeat> {
    vec![
        // last week, Tue 6th: 100 + 120 (gap to Monday capped)
        heartbeat("lw-1", at(6, 10, 0, 0), "web/src/app.ts", Some("web")),
        heartbeat("lw-2", at(6, 10, 1, 40), "web/src/app.ts", Some("web")),
        // this week, Mon 12th: 100 + 100 + 120 (gap to today capped)
        heartbeat("mon-1", at(12, 9, 0, 0), "src/lib.rs", Some("api")),
        heartbeat("mon-2", at(12, 9, 1, 40), "src/lib.rs", Some("api")),
        heartbeat("mon-3", at(12, 9, 3, 20), "src/main.rs", Some("api")),
        // today, Wed 14th: 90 + 90 + 60 trailing
        heartbeat("wed-1", at(14, 14, 0, 0), "src/lib.rs", Some("api")),
        heartbeat("wed-2", at(14, 14, 1, 30), "src/lib.rs", Some("api")),
        heartbeat("wed-3", at(14, 14, 3, 0), "README.md", None),
    ]
}

/// Write heartbeats to `path` one JSON record per line
pub fn write_jsonl(path: &Path, heartbeats: &[Heartbeat]) {
    for hb in heartbeats {
        append_jsonl(path, hb).unwrap();
    }
}
