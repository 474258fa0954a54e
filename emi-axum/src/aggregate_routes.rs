use crate::ApiSource;
use crate::record_routes::internal_error;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use emi_core::{
    interpret::Interpreter,
    models::{DailyMarketSummary, DateRange, DiscomLoadSummary, Market},
};
use serde::Deserialize;
use time::Date;

#[derive(Deserialize)]
pub(crate) struct MarketAggregationQuery {
    product: Option<String>,
    #[serde(default, with = "emi_core::models::iso_date::option")]
    start_date: Option<Date>,
    #[serde(default, with = "emi_core::models::iso_date::option")]
    end_date: Option<Date>,
}

#[derive(Deserialize)]
pub(crate) struct LoadAggregationQuery {
    discom: Option<String>,
    #[serde(default, with = "emi_core::models::iso_date::option")]
    date: Option<Date>,
}

/// Per-day, per-market clearing statistics over a date range.
///
/// # Returns
///
/// - `200 OK`: one summary per (day, market) pair with records
/// - `400 Bad Request`: missing date bounds, inverted range, or an
///   unparseable product
/// - `500 Internal Server Error`: the data source could not be read
pub(crate) async fn market_aggregation<S: ApiSource>(
    State(interpreter): State<Interpreter<S>>,
    Query(params): Query<MarketAggregationQuery>,
) -> Result<Json<Vec<DailyMarketSummary>>, (StatusCode, String)> {
    let (Some(start), Some(end)) = (params.start_date, params.end_date) else {
        return Err((
            StatusCode::BAD_REQUEST,
            "start_date and end_date are required".to_string(),
        ));
    };
    let range =
        DateRange::new(start, end).map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
    let market = params
        .product
        .as_deref()
        .map(str::parse::<Market>)
        .transpose()
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    interpreter
        .aggregator()
        .daily_market_summary(range, market)
        .await
        .map(Json)
        .map_err(internal_error)
}

/// Per-discom drawal statistics for one delivery day.
///
/// # Returns
///
/// - `200 OK`: one summary per discom with rows on the day
/// - `400 Bad Request`: the `date` parameter is missing
/// - `500 Internal Server Error`: the data source could not be read
pub(crate) async fn load_aggregation<S: ApiSource>(
    State(interpreter): State<Interpreter<S>>,
    Query(params): Query<LoadAggregationQuery>,
) -> Result<Json<Vec<DiscomLoadSummary>>, (StatusCode, String)> {
    let Some(date) = params.date else {
        return Err((StatusCode::BAD_REQUEST, "date is required".to_string()));
    };

    interpreter
        .aggregator()
        .load_by_discom(date, params.discom.as_deref())
        .await
        .map(Json)
        .map_err(internal_error)
}
