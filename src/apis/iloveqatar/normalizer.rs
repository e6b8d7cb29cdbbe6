use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::types::{Event, RawEventData};

static HYPHEN_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*").expect("hyphen split regex"));

// "25 - 26 December 2023"
static DAY_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*-\s*(\d+)\s*(.*)").expect("day range regex"));

static LAST_HYPHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)\s*-\s*(.+)").expect("last hyphen regex"));

/// A single way of reading a "start - end" string.
pub struct RangeRule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<(String, String)>,
}

/// Tried in order; the first rule that returns a pair wins.
pub const DATE_RULES: &[RangeRule] = &[
    RangeRule {
        name: "full_date_split",
        apply: split_full_dates,
    },
    RangeRule {
        name: "shared_month_year",
        apply: split_day_range,
    },
];

pub const TIME_RULES: &[RangeRule] = &[
    RangeRule {
        name: "hyphen_split",
        apply: split_on_single_hyphen,
    },
    RangeRule {
        name: "last_hyphen",
        apply: split_on_last_hyphen,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeRange {
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Exactly one hyphen separator, both halves kept as-is after trimming.
fn split_on_single_hyphen(input: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = HYPHEN_SPLIT.split(input).collect();
    match parts.as_slice() {
        [start, end] => Some((start.trim().to_string(), end.trim().to_string())),
        _ => None,
    }
}

/// Like `split_on_single_hyphen`, but a bare day number is not a date on its
/// own; that shape belongs to `split_day_range`.
fn split_full_dates(input: &str) -> Option<(String, String)> {
    let (start, end) = split_on_single_hyphen(input)?;
    if !start.is_empty() && start.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((start, end))
}

fn split_day_range(input: &str) -> Option<(String, String)> {
    let caps = DAY_RANGE.captures(input)?;
    let rest = caps.get(3).map_or("", |m| m.as_str()).trim();
    let with_rest = |day: &str| {
        if rest.is_empty() {
            day.to_string()
        } else {
            format!("{} {}", day, rest)
        }
    };
    Some((with_rest(&caps[1]), with_rest(&caps[2])))
}

fn split_on_last_hyphen(input: &str) -> Option<(String, String)> {
    let caps = LAST_HYPHEN.captures(input)?;
    let start = caps[1].trim();
    let end = caps[2].trim();
    if start.is_empty() || end.is_empty() {
        return None;
    }
    Some((start.to_string(), end.to_string()))
}

/// Split `input` with the first matching rule. When nothing matches, the
/// value describes a single moment and start == end.
pub fn split_range(rules: &[RangeRule], input: &str) -> (String, String) {
    let cleaned = input.trim();
    rules
        .iter()
        .find_map(|rule| {
            (rule.apply)(cleaned).map(|pair| {
                trace!(rule = rule.name, input = cleaned, "range rule matched");
                pair
            })
        })
        .unwrap_or_else(|| (cleaned.to_string(), cleaned.to_string()))
}

/// Break raw date and time strings into start/end components. Never fails;
/// strings that don't look like ranges pass through unchanged.
pub fn parse_date_time(date_str: &str, time_str: &str) -> DateTimeRange {
    let (start_date, end_date) = split_range(DATE_RULES, date_str);
    let (start_time, end_time) = split_range(TIME_RULES, time_str);
    DateTimeRange {
        start_date,
        end_date,
        start_time,
        end_time,
    }
}

pub struct ILoveQatarNormalizer {
    source_name: &'static str,
}

impl ILoveQatarNormalizer {
    pub fn new(source_name: &'static str) -> Self {
        Self { source_name }
    }

    /// Field-for-field mapping onto the shared event record.
    pub fn normalize(&self, raw: RawEventData) -> Event {
        Event {
            title: raw.title,
            start_date: raw.start_date,
            end_date: raw.end_date,
            time: raw.time,
            start_time: raw.start_time,
            end_time: raw.end_time,
            location: raw.location,
            description: raw.description,
            category: raw.category,
            price: raw.prices,
            tickets: raw.tickets,
            link: raw.link,
            source: self.source_name.to_string(),
            raw_data: Some(raw.raw_data),
        }
    }
}
