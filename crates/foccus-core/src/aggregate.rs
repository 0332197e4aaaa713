//! Range filtering, grouping and top-N ranking over timed heartbeats

use crate::types::{RankedItem, TimedHeartbeat};
use std::collections::HashMap;

fn in_range(hb: &TimedHeartbeat, start_ms: i64, end_ms: i64) -> bool {
    let ms = hb.timestamp_ms();
    ms >= start_ms && ms < end_ms
}

/// Sum of durations for heartbeats in `[start_ms, end_ms)`
pub fn sum_in_range<'a, I>(heartbeats: I, start_ms: i64, end_ms: i64) -> u64
where
    I: IntoIterator<Item = &'a TimedHeartbeat>,
{
    heartbeats
        .into_iter()
        .filter(|hb| in_range(hb, start_ms, end_ms))
        .map(|hb| hb.duration_seconds)
        .sum()
}

/// Heartbeats in `[start_ms, end_ms)`, in input order
pub fn filter_by_range<'a, I>(heartbeats: I, start_ms: i64, end_ms: i64) -> Vec<&'a TimedHeartbeat>
where
    I: IntoIterator<Item = &'a TimedHeartbeat>,
{
    heartbeats
        .into_iter()
        .filter(|hb| in_range(hb, start_ms, end_ms))
        .collect()
}

/// Summed seconds per key, remembering the order keys were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    entries: Vec<RankedItem>,
    index: HashMap<String, usize>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: String, seconds: u64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].seconds += seconds,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(RankedItem::new(key, seconds));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].seconds)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &RankedItem> {
        self.entries.iter()
    }
}

impl FromIterator<(String, u64)> for Grouping {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut grouping = Grouping::new();
        for (key, seconds) in iter {
            grouping.add(key, seconds);
        }
        grouping
    }
}

/// Group durations by a derived key.
///
/// The key function is responsible for substituting a fallback label for
/// blank values (see [`crate::labels::safe_label`]).
pub fn group_by<'a, I, F>(heartbeats: I, key_fn: F) -> Grouping
where
    I: IntoIterator<Item = &'a TimedHeartbeat>,
    F: Fn(&TimedHeartbeat) -> String,
{
    heartbeats
        .into_iter()
        .map(|hb| (key_fn(hb), hb.duration_seconds))
        .collect()
}

/// Up to `limit` entries with at least `floor` seconds, largest first.
///
/// Entries below the floor are excluded entirely. Ties keep first-seen order.
pub fn top_ranked(grouping: &Grouping, limit: usize, floor: u64) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = grouping
        .iter()
        .filter(|item| item.seconds >= floor)
        .cloned()
        .collect();
    ranked.sort_by_key(|item| std::cmp::Reverse(item.seconds));
    ranked.truncate(limit);
    ranked
}

pub fn top_one(grouping: &Grouping, floor: u64) -> Option<RankedItem> {
    top_ranked(grouping, 1, floor).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use foccus_telemetry::{Heartbeat, Source};

    fn timed(id: &str, ts: i64, project: &str, secs: u64) -> TimedHeartbeat {
        TimedHeartbeat {
            heartbeat: Heartbeat::new(
                id,
                ts,
                "src/a.rs",
                Some(project.into()),
                None,
                Source::Human,
            ),
            duration_seconds: secs,
        }
    }

    fn project_key(hb: &TimedHeartbeat) -> String {
        hb.heartbeat.project.clone().unwrap_or_default()
    }

    #[test]
    fn test_sum_in_range_half_open() {
        let hbs = vec![timed("a", 10, "p", 5), timed("b", 20, "p", 7), timed("c", 30, "p", 11)];
        assert_eq!(sum_in_range(&hbs, 10_000, 30_000), 12);
        assert_eq!(sum_in_range(&hbs, 10_001, 30_001), 18);
        assert_eq!(sum_in_range(&hbs, 0, 0), 0);
    }

    #[test]
    fn test_sum_in_range_is_additive() {
        let hbs: Vec<_> = (0..50)
            .map(|i| timed(&format!("h{i}"), i * 13, "p", (i % 7 + 1) as u64))
            .collect();
        let (a, b, c) = (0, 200_000, 650_000);
        assert_eq!(
            sum_in_range(&hbs, a, b) + sum_in_range(&hbs, b, c),
            sum_in_range(&hbs, a, c)
        );
        // boundary landing exactly on a heartbeat
        let b = 13 * 1000 * 10;
        assert_eq!(
            sum_in_range(&hbs, a, b) + sum_in_range(&hbs, b, c),
            sum_in_range(&hbs, a, c)
        );
    }

    #[test]
    fn test_filter_by_range() {
        let hbs = vec![timed("a", 10, "p", 5), timed("b", 20, "p", 7)];
        let filtered = filter_by_range(&hbs, 15_000, 25_000);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].heartbeat.id, "b");
    }

    #[test]
    fn test_group_by_sums_and_keeps_order() {
        let hbs = vec![timed("1", 0, "B", 10), timed("2", 1, "A", 5), timed("3", 2, "B", 20)];
        let grouping = group_by(&hbs, project_key);
        assert_eq!(grouping.len(), 2);
        assert_eq!(grouping.get("B"), Some(30));
        assert_eq!(grouping.get("A"), Some(5));
        let keys: Vec<_> = grouping.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(keys, vec!["B", "A"]);
    }

    #[test]
    fn test_top_ranked_floor_excludes() {
        let hbs = vec![timed("1", 0, "A", 30), timed("2", 1, "A", 40), timed("3", 2, "B", 500)];
        let grouping = group_by(&hbs, project_key);
        assert_eq!(top_ranked(&grouping, 1, 60), vec![RankedItem::new("B", 500)]);
        assert_eq!(top_ranked(&grouping, 5, 80), vec![RankedItem::new("B", 500)]);
        assert_eq!(top_ranked(&grouping, 5, 60).len(), 2);
    }

    #[test]
    fn test_top_ranked_bounds_and_order() {
        let grouping: Grouping = [("a", 90), ("b", 300), ("c", 61), ("d", 300), ("e", 10)]
            .into_iter()
            .map(|(k, s)| (k.to_string(), s))
            .collect();

        let ranked = top_ranked(&grouping, 3, 60);
        assert!(ranked.len() <= 3);
        assert!(ranked.iter().all(|r| r.seconds >= 60));
        assert!(ranked.windows(2).all(|w| w[0].seconds >= w[1].seconds));
        // ties resolve by first-seen order
        let labels: Vec<_> = ranked.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d", "a"]);
    }

    #[test]
    fn test_top_one_empty() {
        assert_eq!(top_one(&Grouping::new(), 60), None);
        let grouping: Grouping = std::iter::once(("x".to_string(), 59)).collect();
        assert_eq!(top_one(&grouping, 60), None);
    }
}
