//! The aggregation engine: one operation per resolved intent.
//!
//! Every operation takes the resolved `(DateRange, Option<Market>)` pair,
//! reads through the [`MarketDataSource`] port, and produces a
//! [`QueryResult::Answer`] carrying both a formatted sentence and the
//! structured numeric payload. Storage failures propagate untouched.

use crate::models::{
    AnswerData, DailyMarketSummary, DateRange, DiscomLoadSummary, Market, MarketRecord,
    QueryResult, ScheduleKind, TrendPoint,
};
use crate::ports::MarketDataSource;
use time::Date;

/// Computes the supported statistics over a [`MarketDataSource`].
#[derive(Debug, Clone)]
pub struct Aggregator<S> {
    source: S,
}

impl<S: MarketDataSource> Aggregator<S> {
    /// Wrap a data source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Volume-weighted average clearing price over the period.
    ///
    /// Returns the designated "no data found" answer (with a null payload)
    /// when the filters match zero records.
    pub async fn average_price(
        &self,
        range: DateRange,
        market: Option<Market>,
    ) -> Result<QueryResult, S::Error> {
        let records = self.source.market_records(range, market).await?;
        if records.is_empty() {
            return Ok(no_data(range));
        }

        let (price, total_volume) = weighted_average(&records);
        let price = round2(price);
        Ok(QueryResult::Answer {
            response: format!(
                "Average price{} from {} to {} is ₹{:.2}/MWh",
                market_suffix(market),
                range.start,
                range.end,
                price
            ),
            data: Some(AnswerData::AveragePrice {
                weighted_average_price: price,
                total_volume,
                period: range,
                product: market,
            }),
        })
    }

    /// Total cleared volume over the period, 0 when nothing matches.
    pub async fn total_volume(
        &self,
        range: DateRange,
        market: Option<Market>,
    ) -> Result<QueryResult, S::Error> {
        let records = self.source.market_records(range, market).await?;
        let total_volume: f64 = records.iter().map(|r| r.volume).sum();

        Ok(QueryResult::Answer {
            response: format!(
                "Total volume{} from {} to {} is {:.2} MWh",
                market_suffix(market),
                range.start,
                range.end,
                total_volume
            ),
            data: Some(AnswerData::TotalVolume {
                total_volume,
                period: range,
                product: market,
            }),
        })
    }

    /// Total scheduled load over the period, with its per-day average.
    pub async fn load_summary(&self, range: DateRange) -> Result<QueryResult, S::Error> {
        let records = self
            .source
            .schedule_records(ScheduleKind::Load, range, None)
            .await?;
        let total: f64 = records.iter().map(|r| r.scheduled).sum();
        let average = daily_average(total, range);

        Ok(QueryResult::Answer {
            response: format!(
                "Total scheduled load from {} to {} is {:.2} MWh (avg {:.2} MWh/day)",
                range.start, range.end, total, average
            ),
            data: Some(AnswerData::LoadSummary {
                total_load: total,
                average_daily_load: average,
                period: range,
            }),
        })
    }

    /// Total scheduled generation over the period, with its per-day average.
    pub async fn generation_summary(&self, range: DateRange) -> Result<QueryResult, S::Error> {
        let records = self
            .source
            .schedule_records(ScheduleKind::Generation, range, None)
            .await?;
        let total: f64 = records.iter().map(|r| r.scheduled).sum();
        let average = daily_average(total, range);

        Ok(QueryResult::Answer {
            response: format!(
                "Total scheduled generation from {} to {} is {:.2} MWh (avg {:.2} MWh/day)",
                range.start, range.end, total, average
            ),
            data: Some(AnswerData::GenerationSummary {
                total_generation: total,
                average_daily_generation: average,
                period: range,
            }),
        })
    }

    /// The day-by-day weighted price and volume series over the period.
    ///
    /// Days with no matching records are omitted, not zero-filled, so the
    /// series is ascending by date with no duplicates and no gaps-as-zeros.
    pub async fn price_trend(
        &self,
        range: DateRange,
        market: Option<Market>,
    ) -> Result<QueryResult, S::Error> {
        let records = self.source.market_records(range, market).await?;

        let mut trend = Vec::new();
        for day in range.iter_days() {
            let day_records: Vec<&MarketRecord> = records
                .iter()
                .filter(|r| r.timestamp.date() == day)
                .collect();
            if day_records.is_empty() {
                continue;
            }
            let volume: f64 = day_records.iter().map(|r| r.volume).sum();
            let price = if volume > 0.0 {
                day_records.iter().map(|r| r.price * r.volume).sum::<f64>() / volume
            } else {
                0.0
            };
            trend.push(TrendPoint {
                date: day,
                price: round2(price),
                volume,
            });
        }

        Ok(QueryResult::Answer {
            response: format!(
                "Price trend{} from {} to {}",
                market_suffix(market),
                range.start,
                range.end
            ),
            data: Some(AnswerData::PriceTrend {
                trend,
                period: range,
                product: market,
                chart_type: "line".to_owned(),
            }),
        })
    }

    /// Per-day, per-market clearing statistics over the period.
    ///
    /// One entry per (day, market) pair that had records, ascending by
    /// date with DAM before RTM within a day.
    pub async fn daily_market_summary(
        &self,
        range: DateRange,
        market: Option<Market>,
    ) -> Result<Vec<DailyMarketSummary>, S::Error> {
        let records = self.source.market_records(range, market).await?;
        let products = match market {
            Some(market) => vec![market],
            None => vec![Market::Dam, Market::Rtm],
        };

        let mut summaries = Vec::new();
        for day in range.iter_days() {
            for &product in &products {
                let day_records: Vec<&MarketRecord> = records
                    .iter()
                    .filter(|r| r.timestamp.date() == day && r.market == product)
                    .collect();
                if day_records.is_empty() {
                    continue;
                }
                let total_volume: f64 = day_records.iter().map(|r| r.volume).sum();
                let price = if total_volume > 0.0 {
                    day_records.iter().map(|r| r.price * r.volume).sum::<f64>() / total_volume
                } else {
                    0.0
                };
                let min_price = day_records
                    .iter()
                    .map(|r| r.price)
                    .fold(f64::INFINITY, f64::min);
                let max_price = day_records
                    .iter()
                    .map(|r| r.price)
                    .fold(f64::NEG_INFINITY, f64::max);
                summaries.push(DailyMarketSummary {
                    date: day,
                    product,
                    weighted_avg_price: round2(price),
                    total_volume,
                    min_price,
                    max_price,
                });
            }
        }
        Ok(summaries)
    }

    /// Per-discom drawal statistics for one delivery day.
    ///
    /// One entry per discom with schedule rows on `date`, in the order
    /// the data source returns them. `total_actual_demand` is `None`
    /// when none of the discom's blocks have been metered.
    pub async fn load_by_discom(
        &self,
        date: Date,
        discom: Option<&str>,
    ) -> Result<Vec<DiscomLoadSummary>, S::Error> {
        let records = self
            .source
            .schedule_records(ScheduleKind::Load, DateRange::ending_at(date, 0), discom)
            .await?;

        let mut discoms: Vec<&str> = Vec::new();
        for record in &records {
            if !discoms.contains(&record.entity.as_str()) {
                discoms.push(&record.entity);
            }
        }

        let mut summaries = Vec::new();
        for name in discoms {
            let rows: Vec<_> = records.iter().filter(|r| r.entity == name).collect();
            let Some(peak) = rows.iter().max_by(|a, b| a.scheduled.total_cmp(&b.scheduled))
            else {
                continue;
            };
            let total_scheduled: f64 = rows.iter().map(|r| r.scheduled).sum();
            let actuals: Vec<f64> = rows.iter().filter_map(|r| r.actual).collect();
            let total_actual = (!actuals.is_empty()).then(|| actuals.iter().sum());
            summaries.push(DiscomLoadSummary {
                date,
                discom: name.to_owned(),
                total_scheduled_demand: total_scheduled,
                total_actual_demand: total_actual,
                peak_demand_block: peak.block,
                peak_demand_value: peak.scheduled,
            });
        }
        Ok(summaries)
    }
}

/// The volume-weighted mean price and the total volume of `records`.
///
/// Defined as 0 (not NaN) when the total volume is 0.
fn weighted_average(records: &[MarketRecord]) -> (f64, f64) {
    let total_volume: f64 = records.iter().map(|r| r.volume).sum();
    if total_volume > 0.0 {
        let weighted = records.iter().map(|r| r.price * r.volume).sum::<f64>() / total_volume;
        (weighted, total_volume)
    } else {
        (0.0, total_volume)
    }
}

/// `total / max(span_days, 1)`, guarded so a zero total reports a zero
/// average rather than being skipped.
fn daily_average(total: f64, range: DateRange) -> f64 {
    if total > 0.0 {
        total / range.span_days().max(1) as f64
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn market_suffix(market: Option<Market>) -> String {
    market.map(|m| format!(" for {m}")).unwrap_or_default()
}

fn no_data(range: DateRange) -> QueryResult {
    QueryResult::Answer {
        response: format!(
            "No data found for the specified period ({} to {})",
            range.start, range.end
        ),
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn record(price: f64, volume: f64) -> MarketRecord {
        MarketRecord {
            market: Market::Dam,
            timestamp: datetime!(2025-01-01 12:00 UTC),
            price,
            volume,
        }
    }

    #[test]
    fn test_weighted_average_weighs_by_volume() {
        let (price, volume) = weighted_average(&[record(100.0, 1.0), record(200.0, 3.0)]);
        assert_eq!(price, 175.0);
        assert_eq!(volume, 4.0);
    }

    #[test]
    fn test_weighted_average_uniform_price_is_exact() {
        let records = [record(42.5, 1.0), record(42.5, 999.0), record(42.5, 0.25)];
        let (price, _) = weighted_average(&records);
        assert_eq!(price, 42.5);
    }

    #[test]
    fn test_weighted_average_zero_volume_is_zero() {
        let (price, volume) = weighted_average(&[record(100.0, 0.0), record(200.0, 0.0)]);
        assert_eq!(price, 0.0);
        assert_eq!(volume, 0.0);
    }

    #[test]
    fn test_daily_average_zero_total() {
        let range = DateRange::ending_at(time::macros::date!(2025 - 01 - 07), 7);
        assert_eq!(daily_average(0.0, range), 0.0);
    }

    #[test]
    fn test_daily_average_single_day_divides_by_one() {
        let range = DateRange::ending_at(time::macros::date!(2025 - 01 - 07), 0);
        assert_eq!(daily_average(96.0, range), 96.0);
    }
}
