use serde::{Deserialize, Serialize};

/// What a query is asking for.
///
/// Determined once per query by the intent classifier and never revised.
/// [`Intent::Unresolved`] routes the query to the clarification engine
/// instead of the aggregation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Volume-weighted average clearing price over a period
    AveragePrice,
    /// Total cleared volume over a period
    TotalVolume,
    /// Total and average daily scheduled load
    LoadSummary,
    /// Total and average daily scheduled generation
    GenerationSummary,
    /// Day-by-day weighted price and volume series
    PriceTrend,
    /// No pattern matched; needs clarification or a fallback
    Unresolved,
}
