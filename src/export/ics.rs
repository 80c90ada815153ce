//! Calendar file export for a single alert.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveTime, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Trigger};
use regex::Regex;

use crate::alerts::{parse_clock_time, parse_flexible_date, Alert};

const PRODID: &str = "-//Alert Events App//EN";
const UID_DOMAIN: &str = "alert-events-app";
const MAX_FILE_STEM: usize = 60;

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Builds an .ics document for `alert`, or `None` when its date is unreadable.
///
/// `stamp` becomes DTSTAMP; passing it in keeps the output reproducible.
pub fn build_ics(alert: &Alert, lead_days: u32, stamp: DateTime<Utc>) -> Option<String> {
    let date = parse_flexible_date(&alert.date)?;
    let time = parse_clock_time(&alert.time).unwrap_or_else(default_start_time);
    let start = date.and_time(time).format("%Y%m%dT%H%M%S").to_string();

    let title = alert.title.replace("\r\n", " ").replace('\n', " ");
    let title = title.trim();
    let title = if title.is_empty() { "Alert" } else { title };

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@{}", alert.id, UID_DOMAIN));
    ics_event.add_property("DTSTAMP", stamp.format("%Y%m%dT%H%M%SZ").to_string());
    ics_event.add_property("DTSTART", &start);
    ics_event.add_property("DTEND", &start);
    ics_event.summary(title);

    let notes = alert.notes.trim();
    if !notes.is_empty() {
        ics_event.description(notes);
    }

    let owner = alert.owner.trim();
    if !owner.is_empty() {
        ics_event.location(owner);
    }

    let trigger = Trigger::before_start(chrono::Duration::days(i64::from(lead_days)));
    ics_event.alarm(Alarm::display(&format!("Reminder: {}", title), trigger));

    let mut cal = Calendar::new();
    cal.push(ics_event.done());
    let cal = cal.done();

    tracing::debug!("Built calendar export for alert {}", alert.id);
    Some(tidy_ics(&cal.to_string()))
}

/// Rewrites PRODID and drops the DTSTAMP/UID lines the icalendar crate
/// emits inside VALARM blocks.
fn tidy_ics(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn non_alphanumeric_run() -> &'static Regex {
    static NON_ALNUM_RE: OnceLock<Regex> = OnceLock::new();
    NON_ALNUM_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("invalid slug regex"))
}

pub fn ics_file_name(title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = non_alphanumeric_run().replace_all(&lowered, "-");
    let stem: String = slug.trim_matches('-').chars().take(MAX_FILE_STEM).collect();

    if stem.is_empty() {
        "alert.ics".to_string()
    } else {
        format!("{}.ics", stem)
    }
}
