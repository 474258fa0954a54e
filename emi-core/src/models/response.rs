use super::{ClarificationRequest, DateRange, Market};
use serde::{Deserialize, Serialize};
use time::Date;

/// The outcome of interpreting one query.
///
/// Exactly one of three things comes back: a computed answer, a
/// clarification question, or the terminal fallback. The variants are
/// distinguishable on the wire by the `kind` tag so callers never have to
/// sniff for optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryResult {
    /// A fully-resolved query with its computed statistic.
    ///
    /// `data` is `None` for the designated "no data found" answer.
    Answer {
        /// Human-readable sentence describing the result
        response: String,
        /// Structured payload, shaped by the resolved intent
        data: Option<AnswerData>,
    },
    /// The query was underspecified; here is a follow-up question.
    Clarification {
        /// Human-readable follow-up question
        response: String,
        /// The structured clarification payload
        clarification: ClarificationRequest,
    },
    /// The query matched nothing we support.
    Fallback {
        /// Human-readable explanation of what the system can do
        response: String,
    },
}

impl QueryResult {
    /// The human-readable sentence, regardless of variant.
    pub fn response(&self) -> &str {
        match self {
            QueryResult::Answer { response, .. }
            | QueryResult::Clarification { response, .. }
            | QueryResult::Fallback { response } => response,
        }
    }
}

/// The structured payload of an [`QueryResult::Answer`], one shape per
/// resolved intent. Serialized untagged; the field sets are disjoint
/// enough to round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerData {
    /// Volume-weighted average price over the period
    AveragePrice {
        /// Σ(price×volume) / Σ(volume), rounded to 2 decimals
        weighted_average_price: f64,
        /// Σ(volume) over the matched records, MWh
        total_volume: f64,
        /// The resolved time range
        period: DateRange,
        /// The market filter, if one applied
        product: Option<Market>,
    },
    /// Total cleared volume over the period
    TotalVolume {
        /// Σ(volume) over the matched records, MWh
        total_volume: f64,
        /// The resolved time range
        period: DateRange,
        /// The market filter, if one applied
        product: Option<Market>,
    },
    /// Scheduled load summed over the period
    LoadSummary {
        /// Σ(scheduled) over the matched records, MWh
        total_load: f64,
        /// `total_load / max(span_days, 1)`, 0 when the total is 0
        average_daily_load: f64,
        /// The resolved time range
        period: DateRange,
    },
    /// Scheduled generation summed over the period
    GenerationSummary {
        /// Σ(scheduled) over the matched records, MWh
        total_generation: f64,
        /// `total_generation / max(span_days, 1)`, 0 when the total is 0
        average_daily_generation: f64,
        /// The resolved time range
        period: DateRange,
    },
    /// Day-by-day weighted price and volume series
    PriceTrend {
        /// One entry per day that had matching records, ascending by date
        trend: Vec<TrendPoint>,
        /// The resolved time range
        period: DateRange,
        /// The market filter, if one applied
        product: Option<Market>,
        /// Rendering hint for chart-drawing frontends
        chart_type: String,
    },
}

/// One day's entry in a price trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// The calendar day
    #[serde(with = "super::iso_date")]
    pub date: Date,
    /// That day's volume-weighted average price, rounded to 2 decimals
    pub price: f64,
    /// That day's total cleared volume, MWh
    pub volume: f64,
}
