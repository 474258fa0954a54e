//! The query interpretation pipeline and its orchestrator.
//!
//! All matching here is deterministic and rule-based: ordered pattern
//! tables built once at startup and shared read-only across calls. Each
//! call is independent; the clarification round-trip carries no session
//! state.

mod clarify;
mod intent;
mod market;
mod period;

pub use clarify::clarify;
pub use intent::classify;
pub use market::extract_market;
pub use period::{TIME_PHRASES, has_time_phrase, resolve_period};

use crate::aggregate::Aggregator;
use crate::models::{Intent, QueryResult};
use crate::ports::MarketDataSource;
use time::Date;

/// Lower-case and trim a raw query before any matching.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// The top-level entry point: free text in, [`QueryResult`] out.
///
/// One interpreter instance serves every adapter (REST route, one-shot
/// CLI) so the interpretation rules cannot drift between them. It is
/// stateless apart from the wrapped data source and safe to share across
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct Interpreter<S> {
    aggregator: Aggregator<S>,
}

impl<S: MarketDataSource> Interpreter<S> {
    /// Build an interpreter over the given data source.
    pub fn new(source: S) -> Self {
        Self {
            aggregator: Aggregator::new(source),
        }
    }

    /// Borrow the underlying data source.
    pub fn source(&self) -> &S {
        self.aggregator.source()
    }

    /// Borrow the aggregation engine, for callers that need a statistic
    /// without going through text interpretation.
    pub fn aggregator(&self) -> &Aggregator<S> {
        &self.aggregator
    }

    /// Interpret one query as of `today`.
    ///
    /// Never fails on malformed (but non-empty) input: unmatched text
    /// degrades to a clarification or the terminal fallback. The only
    /// error path is an unreadable data source, which propagates as-is.
    /// Callers must reject blank input before invoking this.
    pub async fn process_query(
        &self,
        query: &str,
        today: Date,
    ) -> Result<QueryResult, S::Error> {
        let query = normalize(query);
        debug_assert!(!query.is_empty(), "blank queries are the caller's to reject");

        let intent = classify(&query);
        if intent == Intent::Unresolved {
            return Ok(clarify(&query));
        }

        let range = resolve_period(&query, today);
        let market = extract_market(&query);

        match intent {
            Intent::AveragePrice => self.aggregator.average_price(range, market).await,
            Intent::TotalVolume => self.aggregator.total_volume(range, market).await,
            Intent::LoadSummary => self.aggregator.load_summary(range).await,
            Intent::GenerationSummary => self.aggregator.generation_summary(range).await,
            Intent::PriceTrend => self.aggregator.price_trend(range, market).await,
            // handled above, before parameter extraction
            Intent::Unresolved => unreachable!(),
        }
    }
}
