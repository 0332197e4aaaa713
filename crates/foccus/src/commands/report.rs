use chrono::{DateTime, Local, TimeZone};
use foccus_core::labels::{folder_and_file, truncate_middle};
use foccus_core::report::DAY_LABELS;
use foccus_core::{format_duration, Config, Dashboard, RankedItem};
use foccus_telemetry::{Heartbeat, Paths};
use std::fmt::Write;

const LABEL_WIDTH: usize = 32;

pub fn run(json: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let heartbeats = super::load_all_at(&paths).unwrap_or_default();
    println!("{}", build_report(&heartbeats, &Local::now(), &Config::new(), json)?);
    Ok(())
}

pub fn build_report<Tz: TimeZone>(
    heartbeats: &[Heartbeat],
    now: &DateTime<Tz>,
    config: &Config,
    json: bool,
) -> anyhow::Result<String> {
    if heartbeats.is_empty() {
        return Ok(super::EMPTY_MESSAGE.to_string());
    }

    let dashboard = Dashboard::build(heartbeats, now, config);
    if json {
        return Ok(serde_json::to_string_pretty(&dashboard)?);
    }
    Ok(render_dashboard(&dashboard, config))
}

fn render_dashboard(dashboard: &Dashboard, config: &Config) -> String {
    let floor = config.minimum_display_seconds;
    let fmt = |seconds: u64| format_duration(seconds, floor);
    let mut sections = Vec::new();

    // Section 1: Totals
    let totals = &dashboard.totals;
    sections.push(format!(
        "Coding Dashboard\n================\n\
         Today: {} | Yesterday: {} | This week: {} | This month: {}\n\
         Week over week: {}",
        fmt(totals.today),
        fmt(totals.yesterday),
        fmt(totals.week),
        fmt(totals.month),
        dashboard.comparison
    ));

    // Section 2: Last week
    let last_week = &dashboard.last_week;
    let daily: Vec<String> = DAY_LABELS
        .iter()
        .zip(last_week.daily_seconds)
        .map(|(day, seconds)| format!("{day} {}", fmt(seconds)))
        .collect();
    sections.push(format!(
        "\nLast Week\n---------\n\
         Total: {} across {} active days (avg {})\n{}",
        fmt(last_week.total_seconds),
        last_week.active_days,
        fmt(last_week.average_per_active_day),
        daily.join("  ")
    ));

    // Section 3: Month rankings
    sections.push(format!(
        "\nTop Languages (this month)\n--------------------------\n{}",
        ranked_lines(&dashboard.month.top_languages, floor)
    ));
    sections.push(format!(
        "\nTop Projects (this month)\n-------------------------\n{}",
        ranked_lines(&dashboard.month.top_projects, floor)
    ));

    // Section 4: Featured project drill-down
    let featured = &dashboard.featured;
    if let Some(project) = &featured.project {
        let mut body = format!("{} ({})", project.label, fmt(project.seconds));
        let details = [
            ("Branch", &featured.top_branch),
            ("File", &featured.top_file),
            ("Language", &featured.top_language),
        ];
        for (name, item) in details {
            if let Some(item) = item {
                let _ = write!(
                    body,
                    "\n  {name}: {} ({})",
                    display_label(&item.label),
                    fmt(item.seconds)
                );
            }
        }
        sections.push(format!("\nFeatured Project\n----------------\n{body}"));
    }

    // Section 5: This week by day
    let days: Vec<String> = dashboard
        .week
        .iter()
        .map(|day| {
            let highlights: Vec<String> = [&day.top_language, &day.top_file, &day.top_project]
                .into_iter()
                .flatten()
                .map(|item| display_label(&item.label))
                .collect();
            let highlights = if highlights.is_empty() {
                "-".to_string()
            } else {
                highlights.join(" / ")
            };
            format!("{} {:>8}  {}", day.day_label, fmt(day.total_seconds), highlights)
        })
        .collect();
    sections.push(format!("\nThis Week\n---------\n{}", days.join("\n")));

    sections.join("\n")
}

/// Numbered `label  duration` lines, or a placeholder when empty
pub fn ranked_lines(items: &[RankedItem], floor: u64) -> String {
    if items.is_empty() {
        return "(nothing above the display floor)".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. {:<width$} {}",
                i + 1,
                truncate_middle(&item.label, LABEL_WIDTH),
                format_duration(item.seconds, floor),
                width = LABEL_WIDTH
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// File paths shrink to `parent/file`; other labels pass through
fn display_label(label: &str) -> String {
    if label.contains('/') {
        truncate_middle(&folder_and_file(label), LABEL_WIDTH)
    } else {
        truncate_middle(label, LABEL_WIDTH)
    }
}
