//! Loose date handling for sheet values.
//!
//! Everything here works on calendar days (`NaiveDate`). The reference day is
//! always passed in by the caller; nothing in this module reads the clock.

use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A %B %d %Y",
    "%A, %B %d, %Y",
    "%m-%d-%Y",
];

fn iso_date_pattern() -> &'static Regex {
    static ISO_DATE_RE: OnceLock<Regex> = OnceLock::new();
    ISO_DATE_RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("invalid iso date regex")
    })
}

fn us_date_pattern() -> &'static Regex {
    static US_DATE_RE: OnceLock<Regex> = OnceLock::new();
    US_DATE_RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("invalid m/d/y regex")
    })
}

/// Parses a sheet date value into a calendar day.
///
/// Tries, in order: strict `YYYY-MM-DD`, `M/D/YYYY`, then a general parser.
/// Blank input and anything that cannot be read as a real date yield `None`.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = iso_date_pattern().captures(trimmed) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = us_date_pattern().captures(trimmed) {
        let month = caps[1].parse().ok()?;
        let day = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    parse_general_date(trimmed)
}

fn parse_general_date(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

/// Signed number of calendar days from `reference` to `date`.
pub fn day_offset(date: Option<NaiveDate>, reference: NaiveDate) -> Option<i64> {
    date.map(|d| d.signed_duration_since(reference).num_days())
}

pub fn is_overdue(offset: Option<i64>) -> bool {
    matches!(offset, Some(days) if days < 0)
}

pub fn is_today(offset: Option<i64>) -> bool {
    offset == Some(0)
}

pub fn is_tomorrow(offset: Option<i64>) -> bool {
    offset == Some(1)
}

pub fn is_within_next_week(offset: Option<i64>) -> bool {
    matches!(offset, Some(days) if (0..=7).contains(&days))
}

/// Exclusive bucket used for row styling; the stats counters use the
/// overlapping predicates above instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBucket {
    Overdue,
    Today,
    Tomorrow,
    Upcoming,
    Undated,
}

impl DayBucket {
    pub fn from_offset(offset: Option<i64>) -> Self {
        match offset {
            None => DayBucket::Undated,
            Some(days) if days < 0 => DayBucket::Overdue,
            Some(0) => DayBucket::Today,
            Some(1) => DayBucket::Tomorrow,
            Some(_) => DayBucket::Upcoming,
        }
    }
}

pub fn relative_label(offset: Option<i64>) -> String {
    match offset {
        None => String::new(),
        Some(0) => "today".to_string(),
        Some(1) => "tomorrow".to_string(),
        Some(-1) => "yesterday".to_string(),
        Some(days) if days < 0 => format!("{} days ago", -days),
        Some(days) => format!("in {} days", days),
    }
}

fn clock_24h_pattern() -> &'static Regex {
    static CLOCK_24H_RE: OnceLock<Regex> = OnceLock::new();
    CLOCK_24H_RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{2})$").expect("invalid 24h clock regex")
    })
}

fn clock_12h_pattern() -> &'static Regex {
    static CLOCK_12H_RE: OnceLock<Regex> = OnceLock::new();
    CLOCK_12H_RE.get_or_init(|| {
        Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*([ap]m)$").expect("invalid 12h clock regex")
    })
}

/// Reads `HH:MM` or `H:MM am/pm` wall-clock text.
pub fn parse_clock_time(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();

    if let Some(caps) = clock_24h_pattern().captures(trimmed) {
        let hour = caps[1].parse().ok()?;
        let minute = caps[2].parse().ok()?;
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    let caps = clock_12h_pattern().captures(trimmed)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let is_pm = caps[3].eq_ignore_ascii_case("pm");

    if is_pm && hour < 12 {
        hour += 12;
    }
    if !is_pm && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}
