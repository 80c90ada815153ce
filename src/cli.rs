use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use anyhow::{anyhow, bail, Context};
use chrono::{Local, NaiveDate, Utc};

use alert_events::{
    alerts::{build_view, relative_label, AlertView, FacetFilter, ViewQuery},
    export::{build_ics, ics_file_name},
    storage::config::{FileSettingsStore, Settings, SettingsStore},
    sync::{sync_engine::SyncEngine, weather::WeatherClient},
};

pub const USAGE: &str = "Usage: alert-events [--sample]
       alert-events list [--search TEXT] [--category NAME] [--status NAME]
       alert-events export ID [PATH]
       alert-events weather";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Interactive { sample: bool },
    List(ViewQuery),
    Export { id: String, path: Option<PathBuf> },
    Weather,
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliMode, String> {
    let mut args = args.into_iter().peekable();

    let Some(first) = args.next() else {
        return Ok(CliMode::Interactive { sample: false });
    };

    match first.as_str() {
        "--help" | "-h" => Ok(CliMode::Help),
        "--sample" => match args.next() {
            None => Ok(CliMode::Interactive { sample: true }),
            Some(extra) => Err(format!("Unknown argument: {}", extra)),
        },
        "list" => {
            let mut query = ViewQuery::default();
            while let Some(flag) = args.next() {
                let mut value = || args.next().ok_or_else(|| format!("{} requires a value", flag));
                match flag.as_str() {
                    "--search" => query.search = value()?,
                    "--category" => query.category = FacetFilter::from_choice(&value()?),
                    "--status" => query.status = FacetFilter::from_choice(&value()?),
                    _ => return Err(format!("Unknown argument: {}", flag)),
                }
            }
            Ok(CliMode::List(query))
        }
        "export" => {
            let id = args.next().ok_or("export requires an alert id")?;
            let path = args.next().map(PathBuf::from);
            if let Some(extra) = args.next() {
                return Err(format!("Unknown argument: {}", extra));
            }
            Ok(CliMode::Export { id, path })
        }
        "weather" => Ok(CliMode::Weather),
        _ => Err(format!("Unknown argument: {}", first)),
    }
}

fn load_settings() -> anyhow::Result<Settings> {
    FileSettingsStore::default_location()
        .load()
        .context("Failed to load settings")
}

pub async fn run_list_mode(query: ViewQuery) -> anyhow::Result<()> {
    let settings = load_settings()?;
    let engine = SyncEngine::new(settings);

    let alerts = engine.sync_now().await.context("Failed to sync")?;
    let today = Local::now().date_naive();
    let view = build_view(&alerts, &query, today);

    display_with_pager(&format_list_text(&view, today))?;
    Ok(())
}

pub async fn run_export_mode(id: String, path: Option<PathBuf>) -> anyhow::Result<()> {
    let settings = load_settings()?;
    let lead_days = settings.lead_days;
    let engine = SyncEngine::new(settings);

    let alerts = engine.sync_now().await.context("Failed to sync")?;
    let alert = alerts
        .iter()
        .find(|alert| alert.id == id)
        .ok_or_else(|| anyhow!("No alert with id {}", id))?;

    let Some(ics) = build_ics(alert, lead_days, Utc::now()) else {
        bail!("Alert '{}' has no readable date", alert.title);
    };

    let path = path.unwrap_or_else(|| PathBuf::from(ics_file_name(&alert.title)));
    std::fs::write(&path, ics).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Exported alert {} to {}", alert.id, path.display());
    println!("Wrote {}", path.display());
    Ok(())
}

pub async fn run_weather_mode() -> anyhow::Result<()> {
    let settings = load_settings()?;
    let report = WeatherClient::new()
        .current(settings.weather_lat, settings.weather_lon)
        .await
        .context("Weather unavailable")?;

    println!("{}", report.summary_line());
    Ok(())
}

pub fn format_stats_line(view: &AlertView<'_>) -> String {
    let stats = view.stats;
    format!(
        "Total {} · Tomorrow {} · Today {} · Next 7 days {} · Overdue {}",
        stats.total, stats.tomorrow, stats.today, stats.next7, stats.overdue
    )
}

fn format_list_text(view: &AlertView<'_>, today: NaiveDate) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Alerts – {}", today.format("%A, %B %d, %Y")));
    lines.push(format_stats_line(view));
    lines.push(String::new());

    if view.ordered.is_empty() {
        lines.push("No alerts match.".to_string());
    }

    for row in &view.ordered {
        let alert = row.alert;
        let when = match row.date {
            Some(date) => format!("{} ({})", date.format("%Y-%m-%d"), relative_label(row.offset)),
            None if alert.date.trim().is_empty() => "undated".to_string(),
            None => alert.date.clone(),
        };

        let mut line = format!(
            "{:<26} {:<8} [{}] {}",
            when,
            alert.time,
            alert.priority_level().label(),
            alert.title
        );
        for extra in [&alert.owner, &alert.category, &alert.status] {
            if !extra.trim().is_empty() {
                line.push_str(" | ");
                line.push_str(extra.trim());
            }
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}
