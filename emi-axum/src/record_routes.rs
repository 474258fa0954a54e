use crate::ApiSource;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use emi_core::{
    interpret::Interpreter,
    models::{DateRange, Market, MarketRecord, ScheduleKind, ScheduleRecord},
    ports::MarketDataSource,
};
use serde::Deserialize;
use time::{Date, OffsetDateTime};
use tracing::{Level, event};

// listings default to the trailing 30 days when no bounds are given
const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Deserialize)]
pub(crate) struct MarketRecordQuery {
    product: Option<String>,
    #[serde(default, with = "emi_core::models::iso_date::option")]
    start_date: Option<Date>,
    #[serde(default, with = "emi_core::models::iso_date::option")]
    end_date: Option<Date>,
}

#[derive(Deserialize)]
pub(crate) struct ScheduleRecordQuery {
    entity: Option<String>,
    #[serde(default, with = "emi_core::models::iso_date::option")]
    start_date: Option<Date>,
    #[serde(default, with = "emi_core::models::iso_date::option")]
    end_date: Option<Date>,
}

fn resolve_range(
    start: Option<Date>,
    end: Option<Date>,
) -> Result<DateRange, (StatusCode, String)> {
    let end = end.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    match start {
        Some(start) => DateRange::new(start, end)
            .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string())),
        None => Ok(DateRange::ending_at(end, DEFAULT_WINDOW_DAYS)),
    }
}

pub(crate) fn internal_error<E: std::error::Error>(err: E) -> (StatusCode, String) {
    event!(Level::ERROR, err = err.to_string());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "failed to read records".to_string(),
    )
}

/// List market clearing records within a date range.
///
/// # Returns
///
/// - `200 OK`: the matching records, possibly empty
/// - `400 Bad Request`: unparseable product or inverted date range
/// - `500 Internal Server Error`: the data source could not be read
pub(crate) async fn list_market_records<S: ApiSource>(
    State(interpreter): State<Interpreter<S>>,
    Query(params): Query<MarketRecordQuery>,
) -> Result<Json<Vec<MarketRecord>>, (StatusCode, String)> {
    let market = params
        .product
        .as_deref()
        .map(str::parse::<Market>)
        .transpose()
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
    let range = resolve_range(params.start_date, params.end_date)?;

    interpreter
        .source()
        .market_records(range, market)
        .await
        .map(Json)
        .map_err(internal_error)
}

/// List load schedule records within a date range.
pub(crate) async fn list_load_records<S: ApiSource>(
    State(interpreter): State<Interpreter<S>>,
    Query(params): Query<ScheduleRecordQuery>,
) -> Result<Json<Vec<ScheduleRecord>>, (StatusCode, String)> {
    list_schedule_records(interpreter, ScheduleKind::Load, params).await
}

/// List generation schedule records within a date range.
pub(crate) async fn list_generation_records<S: ApiSource>(
    State(interpreter): State<Interpreter<S>>,
    Query(params): Query<ScheduleRecordQuery>,
) -> Result<Json<Vec<ScheduleRecord>>, (StatusCode, String)> {
    list_schedule_records(interpreter, ScheduleKind::Generation, params).await
}

async fn list_schedule_records<S: ApiSource>(
    interpreter: Interpreter<S>,
    kind: ScheduleKind,
    params: ScheduleRecordQuery,
) -> Result<Json<Vec<ScheduleRecord>>, (StatusCode, String)> {
    let range = resolve_range(params.start_date, params.end_date)?;

    interpreter
        .source()
        .schedule_records(kind, range, params.entity.as_deref())
        .await
        .map(Json)
        .map_err(internal_error)
}
