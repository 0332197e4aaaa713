//! Duration inference: point-in-time heartbeats to active-time intervals
//!
//! Each heartbeat is credited with the gap to the next one, capped so idle
//! stretches are not counted as work. The final heartbeat has no successor and
//! receives a fixed trailing credit instead.

use crate::config::Config;
use crate::types::TimedHeartbeat;
use foccus_telemetry::Heartbeat;

/// Duration for the heartbeat at `current` given its successor, if any
fn gap_seconds(current: i64, next: Option<i64>, config: &Config) -> u64 {
    match next {
        None => config.trailing_seconds,
        Some(next) => {
            let delta = next.saturating_sub(current);
            if delta <= 0 {
                0
            } else {
                (delta as u64).min(config.effective_cap())
            }
        }
    }
}

fn sorted_by_timestamp(heartbeats: &[Heartbeat]) -> Vec<&Heartbeat> {
    let mut ordered: Vec<&Heartbeat> = heartbeats.iter().collect();
    // sort_by_key is stable: equal timestamps keep input order
    ordered.sort_by_key(|hb| hb.timestamp);
    ordered
}

/// Annotate heartbeats with inferred durations, ordered by timestamp.
///
/// Entries whose inferred duration is zero (duplicate timestamps) are dropped.
pub fn infer_durations(heartbeats: &[Heartbeat], config: &Config) -> Vec<TimedHeartbeat> {
    let ordered = sorted_by_timestamp(heartbeats);

    ordered
        .iter()
        .enumerate()
        .filter_map(|(index, hb)| {
            let next = ordered.get(index + 1).map(|n| n.timestamp);
            let duration_seconds = gap_seconds(hb.timestamp, next, config);
            (duration_seconds > 0).then(|| TimedHeartbeat {
                heartbeat: (*hb).clone(),
                duration_seconds,
            })
        })
        .collect()
}

/// Total inferred seconds without materializing the timed sequence
pub fn total_inferred_seconds(heartbeats: &[Heartbeat], config: &Config) -> u64 {
    let ordered = sorted_by_timestamp(heartbeats);

    ordered
        .iter()
        .enumerate()
        .map(|(index, hb)| {
            let next = ordered.get(index + 1).map(|n| n.timestamp);
            gap_seconds(hb.timestamp, next, config)
        })
        .sum()
}
