//! Calendar windows in the caller's time zone

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// Half-open millisecond interval `[start_ms, end_ms)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Window {
    pub fn new<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Self {
        Self {
            start_ms: start.timestamp_millis(),
            end_ms: end.timestamp_millis(),
        }
    }

    /// Window from `start` up to and including the instant `now`
    pub fn until_now<Tz: TimeZone>(start: &DateTime<Tz>, now: &DateTime<Tz>) -> Self {
        Self::new(start, &(now.clone() + Duration::seconds(1)))
    }
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // midnight skipped by a DST jump: take the first instant after the gap
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

pub fn start_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Tz> {
    local_midnight(&at.timezone(), at.date_naive())
}

/// Local midnight `days` calendar days from the day containing `at`
pub fn add_days<Tz: TimeZone>(at: &DateTime<Tz>, days: i64) -> DateTime<Tz> {
    let date = at.date_naive() + Duration::days(days);
    local_midnight(&at.timezone(), date)
}

/// Monday midnight of the week containing `at`
pub fn start_of_week<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Tz> {
    let since_monday = at.weekday().num_days_from_monday() as i64;
    add_days(at, -since_monday)
}

pub fn start_of_month<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Tz> {
    let date = at.date_naive();
    let first = date.with_day(1).unwrap_or(date);
    local_midnight(&at.timezone(), first)
}

/// Calendar days from the day of `earlier` to the day of `later`
pub fn calendar_days_between<Tz: TimeZone>(earlier: &DateTime<Tz>, later: &DateTime<Tz>) -> i64 {
    (later.date_naive() - earlier.date_naive()).num_days()
}
