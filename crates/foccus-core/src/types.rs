//! Derived accounting types

use foccus_telemetry::Heartbeat;
use serde::Serialize;

/// A heartbeat annotated with the active time inferred for it.
///
/// Computed fresh on every read; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedHeartbeat {
    #[serde(flatten)]
    pub heartbeat: Heartbeat,
    pub duration_seconds: u64,
}

impl TimedHeartbeat {
    /// Timestamp scaled to milliseconds, the unit range filters work in
    pub fn timestamp_ms(&self) -> i64 {
        self.heartbeat.timestamp.saturating_mul(1000)
    }
}

/// A label with its summed duration, as produced by ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    pub label: String,
    pub seconds: u64,
}

impl RankedItem {
    pub fn new(label: impl Into<String>, seconds: u64) -> Self {
        Self {
            label: label.into(),
            seconds,
        }
    }
}

/// Per-weekday breakdown for the current week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayInsight {
    pub day_label: String,
    pub total_seconds: u64,
    pub top_language: Option<RankedItem>,
    pub top_file: Option<RankedItem>,
    pub top_project: Option<RankedItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use foccus_telemetry::Source;

    #[test]
    fn test_timed_heartbeat_json_is_camel_case() {
        let timed = TimedHeartbeat {
            heartbeat: Heartbeat::new("h1", 5, "src/lib.rs", None, None, Source::Human),
            duration_seconds: 42,
        };

        let json = serde_json::to_value(&timed).unwrap();
        assert_eq!(json["durationSeconds"], 42);
        assert_eq!(json["filePath"], "src/lib.rs");
        assert!(json.get("duration_seconds").is_none());
    }

    #[test]
    fn test_timestamp_ms() {
        let timed = TimedHeartbeat {
            heartbeat: Heartbeat::new("h1", 7, "a.rs", None, None, Source::Human),
            duration_seconds: 1,
        };
        assert_eq!(timed.timestamp_ms(), 7_000);
    }
}
