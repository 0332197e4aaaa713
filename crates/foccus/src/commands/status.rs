use chrono::{DateTime, Local, TimeZone};
use foccus_core::window::start_of_day;
use foccus_core::{format_duration, total_inferred_seconds, Config};
use foccus_telemetry::Heartbeat;

pub fn run() -> anyhow::Result<()> {
    let now = Local::now();
    let midnight = start_of_day(&now).timestamp();
    let today = super::open_store().and_then(|store| Ok(store.query_after(midnight)?));

    match today {
        Ok(heartbeats) => println!("{}", status_line(&heartbeats, &now, &Config::new())),
        Err(e) => {
            tracing::warn!("could not read heartbeat store: {e:#}");
            println!("{}", super::EMPTY_MESSAGE);
        }
    }
    Ok(())
}

/// `"Xh Ym coded today"` over the heartbeats recorded since local midnight
pub fn status_line<Tz: TimeZone>(
    heartbeats: &[Heartbeat],
    now: &DateTime<Tz>,
    config: &Config,
) -> String {
    let midnight = start_of_day(now).timestamp();
    let today: Vec<Heartbeat> = heartbeats
        .iter()
        .filter(|hb| hb.timestamp >= midnight)
        .cloned()
        .collect();

    let seconds = total_inferred_seconds(&today, config);
    format!(
        "{} coded today",
        format_duration(seconds, config.minimum_display_seconds)
    )
}
