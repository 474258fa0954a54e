use crate::models::DateRange;
use regex::Regex;
use std::sync::LazyLock;
use time::Date;

/// The canonical time phrases and their day offsets, in match order.
///
/// The first phrase found anywhere in the query wins; the phrases are
/// pairwise non-overlapping in practice so order only matters in theory.
pub const TIME_PHRASES: &[(&str, i64)] = &[
    ("today", 0),
    ("yesterday", 1),
    ("last week", 7),
    ("past week", 7),
    ("last month", 30),
    ("past month", 30),
    ("last 7 days", 7),
    ("last 30 days", 30),
];

static DAY_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s+days?").unwrap());

/// Resolve a free-text time phrase into a concrete date range.
///
/// Checks the canonical phrase table first, then a generic `<N> day(s)`
/// pattern, and defaults to a 7-day window when neither matches. The
/// range always ends today; an offset of 0 yields the single-day range
/// for today. Pure function of the text and the supplied date.
pub fn resolve_period(query: &str, today: Date) -> DateRange {
    for (phrase, days) in TIME_PHRASES {
        if query.contains(phrase) {
            return DateRange::ending_at(today, *days);
        }
    }

    if let Some(captures) = DAY_COUNT.captures(query)
        && let Ok(days) = captures[1].parse::<i64>()
    {
        return DateRange::ending_at(today, days);
    }

    DateRange::ending_at(today, 7)
}

/// Whether the query contains any canonical time phrase.
///
/// Deliberately checks only the phrase table, not the `<N> day(s)`
/// fallback. The clarification engine uses this to decide if a time
/// period must be asked for.
pub fn has_time_phrase(query: &str) -> bool {
    TIME_PHRASES.iter().any(|(phrase, _)| query.contains(phrase))
}
