use crate::models::Intent;
use regex::Regex;
use std::sync::LazyLock;

// Shared pattern fragments. A "time token" is any canonical single-word
// phrase, a two-word phrase ("last week"), or a numeric day count; the
// bare two-word alternative is intentionally loose, matching the
// rule-based character of the whole classifier.
const MARKET: &str = r"(?:dam|rtm)";
const TIME: &str = r"(?:today|yesterday|\w+\s+\w+|\d+\s+days?)";

/// The ordered dispatch table: first intent with a matching pattern wins.
///
/// The priority order is load-bearing and deliberately explicit: broader
/// categories further down (e.g. `LoadSummary`'s bare "load") can misfire
/// on incidental mentions, which is an accepted limitation of rule-based
/// matching, not something to silently fix. Built once, shared read-only.
static RULES: LazyLock<Vec<(Intent, Vec<Regex>)>> = LazyLock::new(|| {
    let rule = |patterns: &[String]| {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("intent patterns are compile-time constants"))
            .collect::<Vec<_>>()
    };

    vec![
        (
            Intent::AveragePrice,
            rule(&[
                format!(r"average price.*?{MARKET}.*?{TIME}"),
                format!(r"avg.*?price.*?{MARKET}.*?{TIME}"),
                format!(r"mean.*?price.*?{MARKET}.*?{TIME}"),
            ]),
        ),
        (
            Intent::TotalVolume,
            rule(&[
                format!(r"total volume.*?{MARKET}.*?{TIME}"),
                format!(r"volume.*?{MARKET}.*?{TIME}"),
            ]),
        ),
        (
            Intent::LoadSummary,
            rule(&[
                format!(r"load.*?{TIME}"),
                format!(r"demand.*?{TIME}"),
                format!(r"consumption.*?{TIME}"),
            ]),
        ),
        (
            Intent::GenerationSummary,
            rule(&[
                format!(r"generation.*?{TIME}"),
                format!(r"power.*?generation.*?{TIME}"),
                format!(r"output.*?{TIME}"),
            ]),
        ),
        (
            Intent::PriceTrend,
            rule(&[
                format!(r"price trend.*?{MARKET}"),
                format!(r"trend.*?price.*?{MARKET}"),
                format!(r"price.*?chart.*?{MARKET}"),
            ]),
        ),
    ]
});

/// Map normalized query text to an intent.
///
/// Patterns need only occur somewhere in the text (substring search, not
/// full-string match). Returns [`Intent::Unresolved`] when nothing in the
/// table fires.
pub fn classify(query: &str) -> Intent {
    for (intent, patterns) in RULES.iter() {
        if patterns.iter().any(|pattern| pattern.is_match(query)) {
            return *intent;
        }
    }
    Intent::Unresolved
}
