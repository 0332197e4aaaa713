//! Report builders composed from the aggregation primitives.
//!
//! Every builder is relative to a caller-supplied `now` in the caller's time
//! zone, so day and week boundaries follow local midnight.

use crate::aggregate::{filter_by_range, group_by, sum_in_range, top_one, top_ranked};
use crate::config::Config;
use crate::inference::infer_durations;
use crate::labels::{folder_and_file, safe_label, NO_BRANCH, NO_FILE, NO_LANGUAGE, NO_PROJECT};
use crate::types::{DayInsight, RankedItem, TimedHeartbeat};
use crate::window::{
    add_days, calendar_days_between, start_of_day, start_of_month, start_of_week, Window,
};
use chrono::{DateTime, TimeZone};
use foccus_telemetry::Heartbeat;
use serde::Serialize;
use std::fmt;

pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn language_key(hb: &TimedHeartbeat) -> String {
    safe_label(Some(&hb.heartbeat.language), NO_LANGUAGE)
}

pub fn project_key(hb: &TimedHeartbeat) -> String {
    safe_label(hb.heartbeat.project.as_deref(), NO_PROJECT)
}

pub fn branch_key(hb: &TimedHeartbeat) -> String {
    safe_label(hb.heartbeat.branch.as_deref(), NO_BRANCH)
}

pub fn file_key(hb: &TimedHeartbeat) -> String {
    folder_and_file(&safe_label(Some(&hb.heartbeat.file_path), NO_FILE))
}

fn upper_language_key(hb: &TimedHeartbeat) -> String {
    language_key(hb).to_uppercase()
}

fn sum_window(timed: &[TimedHeartbeat], window: Window) -> u64 {
    sum_in_range(timed, window.start_ms, window.end_ms)
}

/// Headline totals: today, yesterday, week to date and month to date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodingTotals {
    pub today: u64,
    pub yesterday: u64,
    pub week: u64,
    pub month: u64,
}

impl CodingTotals {
    pub fn compute<Tz: TimeZone>(timed: &[TimedHeartbeat], now: &DateTime<Tz>) -> Self {
        let today_start = start_of_day(now);
        let yesterday_start = add_days(now, -1);
        let tomorrow_start = add_days(now, 1);

        Self {
            today: sum_window(timed, Window::new(&today_start, &tomorrow_start)),
            yesterday: sum_window(timed, Window::new(&yesterday_start, &today_start)),
            week: sum_window(timed, Window::until_now(&start_of_week(now), now)),
            month: sum_window(timed, Window::until_now(&start_of_month(now), now)),
        }
    }
}

/// Totals for the full calendar week before the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastWeekSummary {
    pub total_seconds: u64,
    /// Monday through Sunday
    pub daily_seconds: [u64; 7],
    pub active_days: usize,
    pub average_per_active_day: u64,
}

impl LastWeekSummary {
    pub fn compute<Tz: TimeZone>(timed: &[TimedHeartbeat], now: &DateTime<Tz>) -> Self {
        let week_start = start_of_week(now);
        let last_week_start = add_days(&week_start, -7);
        let total_seconds = sum_window(timed, Window::new(&last_week_start, &week_start));

        let mut daily_seconds = [0u64; 7];
        for (offset, slot) in daily_seconds.iter_mut().enumerate() {
            let day_start = add_days(&last_week_start, offset as i64);
            let day_end = add_days(&day_start, 1);
            *slot = sum_window(timed, Window::new(&day_start, &day_end));
        }

        let active_days = daily_seconds.iter().filter(|&&s| s > 0).count();
        let average_per_active_day = if active_days > 0 {
            total_seconds / active_days as u64
        } else {
            0
        };

        Self {
            total_seconds,
            daily_seconds,
            active_days,
            average_per_active_day,
        }
    }
}

/// Week-over-week change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeekComparison {
    /// Last week has no recorded time, so there is nothing to divide by
    NoHistory,
    Change { percent: f64 },
}

impl WeekComparison {
    pub fn between(current: u64, previous: u64) -> Self {
        if previous == 0 {
            return WeekComparison::NoHistory;
        }
        let percent = (current as f64 - previous as f64) / previous as f64 * 100.0;
        WeekComparison::Change { percent }
    }
}

impl fmt::Display for WeekComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekComparison::NoHistory => write!(f, "no history to compare"),
            WeekComparison::Change { percent } => {
                let sign = if *percent >= 0.0 { "+" } else { "" };
                write!(f, "{sign}{percent:.1}% vs last week")
            }
        }
    }
}

/// Top languages and projects within the month window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRankings {
    pub top_languages: Vec<RankedItem>,
    pub top_projects: Vec<RankedItem>,
}

impl MonthRankings {
    pub fn compute(month: &[&TimedHeartbeat], config: &Config) -> Self {
        let floor = config.minimum_display_seconds;
        Self {
            top_languages: top_ranked(
                &group_by(month.iter().copied(), upper_language_key),
                config.top_n,
                floor,
            ),
            top_projects: top_ranked(
                &group_by(month.iter().copied(), project_key),
                config.top_n,
                floor,
            ),
        }
    }
}

/// The month's leading project, with branch/file/language rankings computed
/// only over that project's heartbeats
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FeaturedProject {
    pub project: Option<RankedItem>,
    pub top_branch: Option<RankedItem>,
    pub top_file: Option<RankedItem>,
    pub top_language: Option<RankedItem>,
}

impl FeaturedProject {
    pub fn compute(month: &[&TimedHeartbeat], config: &Config) -> Self {
        let floor = config.minimum_display_seconds;
        let Some(project) = top_one(&group_by(month.iter().copied(), project_key), floor) else {
            return Self::default();
        };

        let drill_down: Vec<&TimedHeartbeat> = month
            .iter()
            .copied()
            .filter(|hb| project_key(hb) == project.label)
            .collect();

        Self {
            top_branch: top_one(&group_by(drill_down.iter().copied(), branch_key), floor),
            top_file: top_one(&group_by(drill_down.iter().copied(), file_key), floor),
            top_language: top_one(&group_by(drill_down.iter().copied(), language_key), floor),
            project: Some(project),
        }
    }
}

/// One [`DayInsight`] per day of the current week, Monday first
pub fn week_insights<Tz: TimeZone>(
    timed: &[TimedHeartbeat],
    now: &DateTime<Tz>,
    config: &Config,
) -> Vec<DayInsight> {
    let week_start = start_of_week(now);
    let floor = config.minimum_display_seconds;

    DAY_LABELS
        .iter()
        .enumerate()
        .map(|(offset, label)| {
            let day_start = add_days(&week_start, offset as i64);
            let window = Window::new(&day_start, &add_days(&day_start, 1));
            let day = filter_by_range(timed, window.start_ms, window.end_ms);

            DayInsight {
                day_label: label.to_string(),
                total_seconds: day.iter().map(|hb| hb.duration_seconds).sum(),
                top_language: top_one(&group_by(day.iter().copied(), language_key), floor),
                top_file: top_one(&group_by(day.iter().copied(), file_key), floor),
                top_project: top_one(&group_by(day.iter().copied(), project_key), floor),
            }
        })
        .collect()
}

/// Everything the dashboard shows, computed in one pass over the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub totals: CodingTotals,
    pub last_week: LastWeekSummary,
    pub comparison: WeekComparison,
    pub month: MonthRankings,
    pub featured: FeaturedProject,
    pub week: Vec<DayInsight>,
}

impl Dashboard {
    pub fn build<Tz: TimeZone>(
        heartbeats: &[Heartbeat],
        now: &DateTime<Tz>,
        config: &Config,
    ) -> Self {
        let timed = infer_durations(heartbeats, config);
        tracing::debug!(heartbeats = heartbeats.len(), timed = timed.len(), "building dashboard");
        Self::from_timed(&timed, now, config)
    }

    pub fn from_timed<Tz: TimeZone>(
        timed: &[TimedHeartbeat],
        now: &DateTime<Tz>,
        config: &Config,
    ) -> Self {
        let totals = CodingTotals::compute(timed, now);
        let last_week = LastWeekSummary::compute(timed, now);
        let month_window = Window::until_now(&start_of_month(now), now);
        let month = filter_by_range(timed, month_window.start_ms, month_window.end_ms);

        Self {
            comparison: WeekComparison::between(totals.week, last_week.total_seconds),
            totals,
            last_week,
            month: MonthRankings::compute(&month, config),
            featured: FeaturedProject::compute(&month, config),
            week: week_insights(timed, now, config),
        }
    }
}

/// Language totals across the entire store, largest first
pub fn language_totals(timed: &[TimedHeartbeat], config: &Config) -> Vec<RankedItem> {
    top_ranked(
        &group_by(timed, upper_language_key),
        usize::MAX,
        config.minimum_display_seconds,
    )
}

/// Calendar days between the oldest heartbeat and `now`, at least 1
pub fn lookback_days<Tz: TimeZone>(heartbeats: &[Heartbeat], now: &DateTime<Tz>) -> i64 {
    heartbeats
        .iter()
        .map(|hb| hb.timestamp)
        .min()
        .and_then(|oldest| now.timezone().timestamp_opt(oldest, 0).single())
        .map(|oldest| calendar_days_between(&oldest, now))
        .unwrap_or(0)
        .max(1)
}

/// Project totals over a lookback window sized to the store's data span
pub fn project_totals<Tz: TimeZone>(
    timed: &[TimedHeartbeat],
    lookback_days: i64,
    now: &DateTime<Tz>,
    config: &Config,
) -> Vec<RankedItem> {
    let window = Window::until_now(&add_days(now, -lookback_days.max(1)), now);
    let in_window = filter_by_range(timed, window.start_ms, window.end_ms);
    top_ranked(
        &group_by(in_window.iter().copied(), project_key),
        usize::MAX,
        config.minimum_display_seconds,
    )
}

/// `"0m"` below the floor, otherwise `"42m"` or `"3h 5m"`
pub fn format_duration(seconds: u64, floor: u64) -> String {
    if seconds < floor {
        return "0m".to_string();
    }
    let minutes = seconds / 60;
    let hours = minutes / 60;
    if hours == 0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h {}m", minutes % 60)
    }
}
