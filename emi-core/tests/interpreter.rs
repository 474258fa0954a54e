//! End-to-end interpreter scenarios over an in-memory data source.

use emi_core::aggregate::Aggregator;
use emi_core::interpret::Interpreter;
use emi_core::models::{
    AnswerData, ClarificationKind, DateRange, Market, MarketRecord, QueryResult, ScheduleKind,
    ScheduleRecord,
};
use emi_core::ports::MarketDataSource;
use std::convert::Infallible;
use time::macros::date;
use time::{Date, Time};

/// A fixture source backed by plain vectors, filtering the same way a
/// real adapter would.
#[derive(Debug, Clone, Default)]
struct StaticSource {
    market: Vec<MarketRecord>,
    load: Vec<ScheduleRecord>,
    generation: Vec<ScheduleRecord>,
}

impl MarketDataSource for StaticSource {
    type Error = Infallible;

    async fn market_records(
        &self,
        range: DateRange,
        market: Option<Market>,
    ) -> Result<Vec<MarketRecord>, Infallible> {
        Ok(self
            .market
            .iter()
            .filter(|r| range.contains(r.timestamp.date()))
            .filter(|r| market.is_none_or(|m| r.market == m))
            .cloned()
            .collect())
    }

    async fn schedule_records(
        &self,
        kind: ScheduleKind,
        range: DateRange,
        entity: Option<&str>,
    ) -> Result<Vec<ScheduleRecord>, Infallible> {
        let records = match kind {
            ScheduleKind::Load => &self.load,
            ScheduleKind::Generation => &self.generation,
        };
        Ok(records
            .iter()
            .filter(|r| range.contains(r.date))
            .filter(|r| entity.is_none_or(|e| r.entity == e))
            .cloned()
            .collect())
    }
}

const TODAY: Date = date!(2025 - 06 - 15);

fn record(market: Market, day: Date, price: f64, volume: f64) -> MarketRecord {
    MarketRecord {
        market,
        timestamp: day.with_time(Time::from_hms(12, 0, 0).unwrap()).assume_utc(),
        price,
        volume,
    }
}

fn yesterday() -> Date {
    TODAY.previous_day().unwrap()
}

#[tokio::test]
async fn average_price_for_dam_last_week() {
    let mut source = StaticSource::default();
    source.market.push(record(Market::Dam, yesterday(), 3000.0, 100.0));
    source.market.push(record(Market::Dam, TODAY, 2000.0, 300.0));
    // out of range and wrong market, both must be ignored
    source.market.push(record(
        Market::Dam,
        date!(2025 - 06 - 01),
        9999.0,
        1000.0,
    ));
    source.market.push(record(Market::Rtm, TODAY, 5000.0, 500.0));

    let interpreter = Interpreter::new(source);
    let result = interpreter
        .process_query("average price for DAM last week", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer { response, data } = result else {
        panic!("expected an answer");
    };
    let Some(AnswerData::AveragePrice {
        weighted_average_price,
        total_volume,
        period,
        product,
    }) = data
    else {
        panic!("expected an average price payload");
    };

    // (3000*100 + 2000*300) / 400
    assert_eq!(weighted_average_price, 2250.0);
    assert_eq!(total_volume, 400.0);
    assert_eq!(product, Some(Market::Dam));
    assert_eq!(period.end, TODAY);
    assert_eq!(period.start, date!(2025 - 06 - 08));
    assert!(response.contains("for DAM"));
    assert!(response.contains("2250.00"));
}

#[tokio::test]
async fn average_price_shares_single_price_exactly() {
    let mut source = StaticSource::default();
    for volume in [1.0, 250.0, 0.125] {
        source.market.push(record(Market::Rtm, TODAY, 4321.0, volume));
    }

    let interpreter = Interpreter::new(source);
    let result = interpreter
        .process_query("average price for rtm today", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer {
        data: Some(AnswerData::AveragePrice { weighted_average_price, .. }),
        ..
    } = result
    else {
        panic!("expected an average price payload");
    };
    assert_eq!(weighted_average_price, 4321.0);
}

#[tokio::test]
async fn average_price_with_zero_volume_reports_zero() {
    let mut source = StaticSource::default();
    source.market.push(record(Market::Dam, TODAY, 2500.0, 0.0));

    let interpreter = Interpreter::new(source);
    let result = interpreter
        .process_query("average price for dam today", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer {
        data: Some(AnswerData::AveragePrice { weighted_average_price, total_volume, .. }),
        ..
    } = result
    else {
        panic!("expected an average price payload");
    };
    assert_eq!(weighted_average_price, 0.0);
    assert_eq!(total_volume, 0.0);
}

#[tokio::test]
async fn average_price_without_records_is_no_data() {
    let interpreter = Interpreter::new(StaticSource::default());
    let result = interpreter
        .process_query("average price for dam last week", TODAY)
        .await
        .unwrap();

    assert!(result.response().contains("No data found"));
    let QueryResult::Answer { data, .. } = result else {
        panic!("expected an answer");
    };
    assert!(data.is_none());
}

#[tokio::test]
async fn total_volume_sums_exactly() {
    let mut source = StaticSource::default();
    let volumes = [100.5, 200.25, 300.0, 55.5, 12.75];
    for volume in volumes {
        source
            .market
            .push(record(Market::Dam, yesterday(), 2500.0, volume));
    }
    // a different market on the same day must not leak in
    source.market.push(record(Market::Rtm, yesterday(), 2500.0, 77.0));

    let interpreter = Interpreter::new(source);
    let result = interpreter
        .process_query("total volume for DAM yesterday", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer {
        data: Some(AnswerData::TotalVolume { total_volume, product, .. }),
        ..
    } = result
    else {
        panic!("expected a total volume payload");
    };
    assert_eq!(total_volume, volumes.iter().sum::<f64>());
    assert_eq!(product, Some(Market::Dam));
}

#[tokio::test]
async fn total_volume_without_records_is_zero() {
    let interpreter = Interpreter::new(StaticSource::default());
    let result = interpreter
        .process_query("total volume for rtm yesterday", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer {
        data: Some(AnswerData::TotalVolume { total_volume, .. }),
        ..
    } = result
    else {
        panic!("expected a total volume payload");
    };
    assert_eq!(total_volume, 0.0);
}

#[tokio::test]
async fn load_summary_averages_per_day() {
    let mut source = StaticSource::default();
    for (day, scheduled) in [(date!(2025 - 06 - 09), 700.0), (date!(2025 - 06 - 14), 700.0)] {
        source.load.push(ScheduleRecord {
            entity: "UPCL".to_owned(),
            date: day,
            block: 1,
            scheduled,
            actual: None,
        });
    }

    let interpreter = Interpreter::new(source);
    let result = interpreter
        .process_query("total load last week", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer {
        data: Some(AnswerData::LoadSummary { total_load, average_daily_load, .. }),
        ..
    } = result
    else {
        panic!("expected a load summary payload");
    };
    assert_eq!(total_load, 1400.0);
    assert_eq!(average_daily_load, 200.0); // 1400 over a 7-day span
}

#[tokio::test]
async fn load_summary_with_no_records_reports_zero_average() {
    let interpreter = Interpreter::new(StaticSource::default());
    let result = interpreter
        .process_query("total load last week", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer {
        data: Some(AnswerData::LoadSummary { total_load, average_daily_load, .. }),
        ..
    } = result
    else {
        panic!("expected a load summary payload");
    };
    assert_eq!(total_load, 0.0);
    assert_eq!(average_daily_load, 0.0);
}

#[tokio::test]
async fn generation_summary_sums_scheduled() {
    let mut source = StaticSource::default();
    source.generation.push(ScheduleRecord {
        entity: "Tehri Hydro".to_owned(),
        date: yesterday(),
        block: 1,
        scheduled: 800.0,
        actual: Some(790.0),
    });
    source.generation.push(ScheduleRecord {
        entity: "NTPC Rihand".to_owned(),
        date: yesterday(),
        block: 1,
        scheduled: 2100.0,
        actual: None,
    });

    let interpreter = Interpreter::new(source);
    let result = interpreter
        .process_query("generation yesterday", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer {
        data: Some(AnswerData::GenerationSummary { total_generation, average_daily_generation, .. }),
        ..
    } = result
    else {
        panic!("expected a generation summary payload");
    };
    assert_eq!(total_generation, 2900.0);
    assert_eq!(average_daily_generation, 2900.0); // 1-day span
}

#[tokio::test]
async fn price_trend_skips_empty_days_and_orders_by_date() {
    let mut source = StaticSource::default();
    // records on three non-consecutive days within the window
    for (day, price, volume) in [
        (date!(2025 - 06 - 10), 2000.0, 10.0),
        (date!(2025 - 06 - 12), 3000.0, 20.0),
        (date!(2025 - 06 - 15), 2500.0, 30.0),
    ] {
        source.market.push(record(Market::Dam, day, price, volume));
    }

    let interpreter = Interpreter::new(source);
    let result = interpreter
        .process_query("price trend for dam last week", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer {
        data: Some(AnswerData::PriceTrend { trend, chart_type, .. }),
        ..
    } = result
    else {
        panic!("expected a price trend payload");
    };

    let dates: Vec<Date> = trend.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![date!(2025 - 06 - 10), date!(2025 - 06 - 12), date!(2025 - 06 - 15)]
    );
    assert_eq!(trend[0].price, 2000.0);
    assert_eq!(trend[2].volume, 30.0);
    assert_eq!(chart_type, "line");
}

#[tokio::test]
async fn clarifications_route_through_the_orchestrator() {
    let interpreter = Interpreter::new(StaticSource::default());

    let cases = [
        ("show me prices", ClarificationKind::ProductSelection),
        ("average price for dam", ClarificationKind::TimeSelection),
        ("show data", ClarificationKind::QueryTypeSelection),
        ("compare dam vs rtm price", ClarificationKind::ComparisonHelp),
    ];
    for (query, expected) in cases {
        let result = interpreter.process_query(query, TODAY).await.unwrap();
        let QueryResult::Clarification { clarification, .. } = result else {
            panic!("expected a clarification for {query:?}");
        };
        assert_eq!(clarification.kind, expected, "for {query:?}");
    }
}

#[tokio::test]
async fn unrelated_query_falls_back() {
    let interpreter = Interpreter::new(StaticSource::default());
    let result = interpreter
        .process_query("what is the weather today", TODAY)
        .await
        .unwrap();
    assert!(result.response().contains("I don't understand"));
    assert!(matches!(result, QueryResult::Fallback { .. }));
}

#[tokio::test]
async fn mixed_case_input_is_normalized() {
    let mut source = StaticSource::default();
    source.market.push(record(Market::Rtm, TODAY, 3100.0, 50.0));

    let interpreter = Interpreter::new(source);
    let result = interpreter
        .process_query("  AVERAGE PRICE for RTM Today  ", TODAY)
        .await
        .unwrap();

    let QueryResult::Answer { data: Some(_), .. } = result else {
        panic!("expected an answer with data");
    };
}

#[tokio::test]
async fn daily_market_summary_groups_by_day_and_product() {
    let mut source = StaticSource::default();
    source.market.push(record(Market::Dam, date!(2025 - 06 - 10), 2000.0, 10.0));
    source.market.push(record(Market::Dam, date!(2025 - 06 - 10), 3000.0, 30.0));
    source.market.push(record(Market::Rtm, date!(2025 - 06 - 10), 2600.0, 5.0));
    source.market.push(record(Market::Dam, date!(2025 - 06 - 11), 2400.0, 8.0));

    let aggregator = Aggregator::new(source);
    let range = DateRange::new(date!(2025 - 06 - 10), date!(2025 - 06 - 11)).unwrap();
    let summaries = aggregator.daily_market_summary(range, None).await.unwrap();

    assert_eq!(summaries.len(), 3);
    let first = &summaries[0];
    assert_eq!(first.date, date!(2025 - 06 - 10));
    assert_eq!(first.product, Market::Dam);
    // (2000*10 + 3000*30) / 40
    assert_eq!(first.weighted_avg_price, 2750.0);
    assert_eq!(first.total_volume, 40.0);
    assert_eq!(first.min_price, 2000.0);
    assert_eq!(first.max_price, 3000.0);
    assert_eq!(summaries[1].product, Market::Rtm);
    assert_eq!(summaries[2].date, date!(2025 - 06 - 11));

    let dam_only = aggregator
        .daily_market_summary(range, Some(Market::Dam))
        .await
        .unwrap();
    assert_eq!(dam_only.len(), 2);
}

#[tokio::test]
async fn load_by_discom_reports_totals_and_peak_block() {
    let mut source = StaticSource::default();
    let day = date!(2025 - 06 - 14);
    for (block, scheduled, actual) in
        [(1, 700.0, Some(690.0)), (2, 800.0, Some(805.0)), (3, 750.0, None)]
    {
        source.load.push(ScheduleRecord {
            entity: "UPCL".to_owned(),
            date: day,
            block,
            scheduled,
            actual,
        });
    }
    source.load.push(ScheduleRecord {
        entity: "PTCUL".to_owned(),
        date: day,
        block: 1,
        scheduled: 300.0,
        actual: None,
    });

    let aggregator = Aggregator::new(source);
    let summaries = aggregator.load_by_discom(day, None).await.unwrap();
    assert_eq!(summaries.len(), 2);

    let upcl = summaries.iter().find(|s| s.discom == "UPCL").unwrap();
    assert_eq!(upcl.total_scheduled_demand, 2250.0);
    assert_eq!(upcl.total_actual_demand, Some(1495.0));
    assert_eq!(upcl.peak_demand_block, 2);
    assert_eq!(upcl.peak_demand_value, 800.0);

    // a discom with no metered blocks reports no actual total
    let ptcul = summaries.iter().find(|s| s.discom == "PTCUL").unwrap();
    assert_eq!(ptcul.total_actual_demand, None);

    let only = aggregator.load_by_discom(day, Some("PTCUL")).await.unwrap();
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].discom, "PTCUL");
}

/// A source whose reads always fail, for exercising the error path.
#[derive(Debug, Clone)]
struct FailingSource;

#[derive(Debug, thiserror::Error)]
#[error("storage offline")]
struct StorageOffline;

impl MarketDataSource for FailingSource {
    type Error = StorageOffline;

    async fn market_records(
        &self,
        _range: DateRange,
        _market: Option<Market>,
    ) -> Result<Vec<MarketRecord>, StorageOffline> {
        Err(StorageOffline)
    }

    async fn schedule_records(
        &self,
        _kind: ScheduleKind,
        _range: DateRange,
        _entity: Option<&str>,
    ) -> Result<Vec<ScheduleRecord>, StorageOffline> {
        Err(StorageOffline)
    }
}

#[tokio::test]
async fn data_source_failure_propagates_as_error() {
    let interpreter = Interpreter::new(FailingSource);
    let result = interpreter
        .process_query("average price for dam last week", TODAY)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn clarifications_never_touch_the_data_source() {
    // would fail loudly if the clarification path read any records
    let interpreter = Interpreter::new(FailingSource);
    let result = interpreter
        .process_query("show me prices", TODAY)
        .await
        .unwrap();
    assert!(matches!(result, QueryResult::Clarification { .. }));
}

// keep the fixture helper honest: timestamps built from a date must land
// on that date
#[test]
fn record_helper_preserves_date() {
    let r = record(Market::Dam, TODAY, 1.0, 1.0);
    assert_eq!(r.timestamp.date(), TODAY);
}
