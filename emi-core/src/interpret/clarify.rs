use super::{extract_market, has_time_phrase};
use crate::models::{
    ClarificationKind, ClarificationOption, ClarificationRequest, QueryResult,
};

const COMPARISON_TERMS: &[&str] = &[
    "compare", "vs", "versus", "difference", "better", "higher", "lower",
];

const VAGUE_TERMS: &[&str] = &[
    "show", "tell", "get", "find", "data", "information", "details",
];

const UNRELATED_TERMS: &[&str] = &[
    "weather", "sports", "movie", "food", "restaurant", "music", "news", "politics",
];

const CAPABILITIES: &str = "I can help you with queries about average prices, total volumes, \
    load data, generation data, and price trends. Try asking something like \
    'Show average price for DAM last week' or 'Total load yesterday'.";

/// Decide how to respond to a query the intent classifier could not place.
///
/// The rules run in a fixed order, first applicable wins: comparison help,
/// missing market for a price or volume question, missing time period for
/// a known market, too-vague short queries, then the terminal fallback.
/// This never touches the data source; it is a pure transform of the
/// query text.
pub fn clarify(query: &str) -> QueryResult {
    if COMPARISON_TERMS.iter().any(|term| query.contains(term)) {
        return comparison_help();
    }

    let market = extract_market(query);

    if query.contains("price") && market.is_none() {
        return product_selection(
            "I can help you with price information. Which market would you like to know about?",
            "average price for {product} {time_period}",
        );
    }

    if query.contains("volume") && market.is_none() {
        return product_selection(
            "I can provide volume information. Which market are you interested in?",
            "total volume for {product} {time_period}",
        );
    }

    if let Some(market) = market
        && !has_time_phrase(query)
    {
        return time_selection(market.as_str());
    }

    if query.split_whitespace().count() <= 3
        && VAGUE_TERMS.iter().any(|term| query.contains(term))
    {
        return query_type_selection();
    }

    // Terminal fallback: no clarification payload at all. Queries about
    // recognizably unrelated topics get an explicit rejection marker.
    if UNRELATED_TERMS.iter().any(|term| query.contains(term)) {
        QueryResult::Fallback {
            response: format!("I don't understand. {CAPABILITIES}"),
        }
    } else {
        QueryResult::Fallback {
            response: CAPABILITIES.to_owned(),
        }
    }
}

fn comparison_help() -> QueryResult {
    QueryResult::Clarification {
        response: "I can help with comparisons! Currently I can show data for individual \
            time periods. What specific comparison would you like to see?"
            .to_owned(),
        clarification: ClarificationRequest {
            kind: ClarificationKind::ComparisonHelp,
            options: Vec::new(),
            suggestions: vec![
                "Try asking for specific time periods, like 'average price for DAM last week' \
                 and 'average price for DAM last month'"
                    .to_owned(),
                "For trends over time, ask 'price trend for DAM last month'".to_owned(),
                "For different markets, ask 'average price for DAM yesterday' and \
                 'average price for RTM yesterday'"
                    .to_owned(),
            ],
            follow_up_template: None,
        },
    }
}

fn product_options() -> Vec<ClarificationOption> {
    vec![
        ClarificationOption::new("DAM (Day Ahead Market)", "dam"),
        ClarificationOption::new("RTM (Real Time Market)", "rtm"),
        ClarificationOption::new("Both markets", "all"),
    ]
}

fn product_selection(response: &str, template: &str) -> QueryResult {
    QueryResult::Clarification {
        response: response.to_owned(),
        clarification: ClarificationRequest {
            kind: ClarificationKind::ProductSelection,
            options: product_options(),
            suggestions: Vec::new(),
            follow_up_template: Some(template.to_owned()),
        },
    }
}

fn time_selection(market: &str) -> QueryResult {
    QueryResult::Clarification {
        response: format!(
            "I can provide {market} information. What time period are you interested in?"
        ),
        clarification: ClarificationRequest {
            kind: ClarificationKind::TimeSelection,
            options: vec![
                ClarificationOption::new("Today", "today"),
                ClarificationOption::new("Yesterday", "yesterday"),
                ClarificationOption::new("Last week", "last week"),
                ClarificationOption::new("Last month", "last month"),
                ClarificationOption::new("Last 7 days", "last 7 days"),
                ClarificationOption::new("Last 30 days", "last 30 days"),
            ],
            suggestions: Vec::new(),
            follow_up_template: Some(format!(
                "average price for {} {{time_period}}",
                market.to_lowercase()
            )),
        },
    }
}

fn query_type_selection() -> QueryResult {
    QueryResult::Clarification {
        response: "I'd be happy to help! What specific information would you like?".to_owned(),
        clarification: ClarificationRequest {
            kind: ClarificationKind::QueryTypeSelection,
            options: vec![
                ClarificationOption::new("Average electricity prices", "average price"),
                ClarificationOption::new("Trading volumes", "total volume"),
                ClarificationOption::new("Load/demand data", "load data"),
                ClarificationOption::new("Generation data", "generation data"),
                ClarificationOption::new("Price trends/charts", "price trend"),
            ],
            suggestions: Vec::new(),
            follow_up_template: Some("{query_type} for {product} {time_period}".to_owned()),
        },
    }
}
