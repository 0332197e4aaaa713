//! Heartbeat accounting: duration inference, aggregation and report builders

pub mod aggregate;
mod config;
pub mod inference;
pub mod labels;
pub mod report;
mod types;
pub mod window;

pub use aggregate::{filter_by_range, group_by, sum_in_range, top_one, top_ranked, Grouping};
pub use config::Config;
pub use inference::{infer_durations, total_inferred_seconds};
pub use report::{
    format_duration, language_totals, lookback_days, project_totals, CodingTotals, Dashboard,
    FeaturedProject, LastWeekSummary, MonthRankings, WeekComparison,
};
pub use types::{DayInsight, RankedItem, TimedHeartbeat};
