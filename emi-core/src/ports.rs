use crate::models::{DateRange, Market, MarketRecord, ScheduleKind, ScheduleRecord};

/// Read-only access to the market time-series store.
///
/// This is the one port the aggregation engine consumes. Implementations
/// own persistence entirely; the core only ever asks for records within a
/// calendar range, optionally narrowed by a dimension filter, and does its
/// own grouping and summing. Both methods are pure reads: an empty result
/// is a valid answer, not an error, and no ordering is guaranteed.
///
/// A failed read must surface as `Self::Error`; the engine propagates it
/// to the caller rather than masking it with a zero or an average.
pub trait MarketDataSource {
    /// The adapter's failure type for unreadable storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch pricing observations whose timestamp falls on a day within
    /// `range`, optionally restricted to one market.
    fn market_records(
        &self,
        range: DateRange,
        market: Option<Market>,
    ) -> impl Future<Output = Result<Vec<MarketRecord>, Self::Error>> + Send;

    /// Fetch load or generation schedule observations dated within
    /// `range`, optionally restricted to one discom/generator by name.
    fn schedule_records(
        &self,
        kind: ScheduleKind,
        range: DateRange,
        entity: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ScheduleRecord>, Self::Error>> + Send;
}
