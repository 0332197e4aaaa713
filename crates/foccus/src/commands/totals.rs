use crate::cli::TotalsBy;
use chrono::{DateTime, Local, TimeZone};
use foccus_core::{infer_durations, language_totals, lookback_days, project_totals, Config};
use foccus_telemetry::{Heartbeat, Paths};

pub fn run(by: TotalsBy) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let heartbeats = super::load_all_at(&paths).unwrap_or_default();
    println!("{}", build_totals(&heartbeats, by, &Local::now(), &Config::new()));
    Ok(())
}

pub fn build_totals<Tz: TimeZone>(
    heartbeats: &[Heartbeat],
    by: TotalsBy,
    now: &DateTime<Tz>,
    config: &Config,
) -> String {
    if heartbeats.is_empty() {
        return super::EMPTY_MESSAGE.to_string();
    }

    let timed = infer_durations(heartbeats, config);
    let (title, items) = match by {
        TotalsBy::Language => ("Languages (all time)", language_totals(&timed, config)),
        TotalsBy::Project => {
            let days = lookback_days(heartbeats, now);
            (
                "Projects (all time)",
                project_totals(&timed, days, now, config),
            )
        }
    };

    format!(
        "{title}\n{}\n{}",
        "-".repeat(title.len()),
        super::report::ranked_lines(&items, config.minimum_display_seconds)
    )
}
