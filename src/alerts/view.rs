use chrono::NaiveDate;

use crate::alerts::alert::Alert;
use crate::alerts::dates::{
    day_offset, is_overdue, is_today, is_tomorrow, is_within_next_week, parse_flexible_date,
};

/// Sentinel choice meaning "no filter" in category/status pickers.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FacetFilter {
    #[default]
    All,
    Exact(String),
}

impl FacetFilter {
    pub fn from_choice(choice: &str) -> Self {
        if choice == ALL {
            FacetFilter::All
        } else {
            FacetFilter::Exact(choice.to_string())
        }
    }

    pub fn choice(&self) -> &str {
        match self {
            FacetFilter::All => ALL,
            FacetFilter::Exact(value) => value,
        }
    }

    /// Exact, case-sensitive comparison; values are not trimmed here.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FacetFilter::All => true,
            FacetFilter::Exact(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewQuery {
    pub search: String,
    pub category: FacetFilter,
    pub status: FacetFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedAlert<'a> {
    pub alert: &'a Alert,
    pub date: Option<NaiveDate>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewStats {
    pub total: usize,
    pub today: usize,
    pub tomorrow: usize,
    pub next7: usize,
    pub overdue: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertView<'a> {
    pub ordered: Vec<AnnotatedAlert<'a>>,
    pub stats: ViewStats,
}

pub fn annotate(alerts: &[Alert], reference: NaiveDate) -> Vec<AnnotatedAlert<'_>> {
    alerts
        .iter()
        .map(|alert| {
            let date = parse_flexible_date(&alert.date);
            AnnotatedAlert {
                alert,
                date,
                offset: day_offset(date, reference),
            }
        })
        .collect()
}

/// Ascending by date with undated rows last. `sort_by_key` is stable, so rows
/// sharing a date keep their input order.
pub fn sort_by_date(rows: &mut [AnnotatedAlert<'_>]) {
    rows.sort_by_key(|row| (row.date.is_none(), row.date));
}

pub fn matches_query(alert: &Alert, query: &ViewQuery) -> bool {
    if !query.category.matches(&alert.category) {
        return false;
    }
    if !query.status.matches(&alert.status) {
        return false;
    }

    let needle = query.search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    search_text(alert).contains(&needle)
}

fn search_text(alert: &Alert) -> String {
    [
        alert.title.as_str(),
        alert.owner.as_str(),
        alert.notes.as_str(),
        alert.category.as_str(),
        alert.status.as_str(),
        alert.priority.as_str(),
        alert.date.as_str(),
        alert.time.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

pub fn aggregate(rows: &[AnnotatedAlert<'_>]) -> ViewStats {
    rows.iter().fold(
        ViewStats {
            total: rows.len(),
            ..ViewStats::default()
        },
        |mut stats, row| {
            if is_today(row.offset) {
                stats.today += 1;
            }
            if is_tomorrow(row.offset) {
                stats.tomorrow += 1;
            }
            if is_within_next_week(row.offset) {
                stats.next7 += 1;
            }
            if is_overdue(row.offset) {
                stats.overdue += 1;
            }
            stats
        },
    )
}

/// Annotates, sorts, filters and counts `alerts` relative to `reference`.
pub fn build_view<'a>(alerts: &'a [Alert], query: &ViewQuery, reference: NaiveDate) -> AlertView<'a> {
    let mut rows = annotate(alerts, reference);
    sort_by_date(&mut rows);
    rows.retain(|row| matches_query(row.alert, query));

    let stats = aggregate(&rows);
    AlertView { ordered: rows, stats }
}

fn distinct_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for value in values.map(str::trim).filter(|v| !v.is_empty()) {
        if !distinct.iter().any(|seen| seen == value) {
            distinct.push(value.to_string());
        }
    }

    distinct.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    distinct.insert(0, ALL.to_string());
    distinct
}

pub fn distinct_categories(alerts: &[Alert]) -> Vec<String> {
    distinct_values(alerts.iter().map(|a| a.category.as_str()))
}

pub fn distinct_statuses(alerts: &[Alert]) -> Vec<String> {
    distinct_values(alerts.iter().map(|a| a.status.as_str()))
}
