use crate::ApiSource;
use axum::{Json, extract::State, http::StatusCode};
use emi_core::{interpret::Interpreter, models::QueryResult};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{Level, event};

#[derive(Deserialize)]
pub(crate) struct QueryRequest {
    query: String,
}

/// Interpret a free-text question about the market time-series.
///
/// # Returns
///
/// - `200 OK`: a `QueryResult` (answer, clarification, or fallback)
/// - `400 Bad Request`: the query was empty or blank
/// - `500 Internal Server Error`: the data source could not be read
pub(crate) async fn process_query<S: ApiSource>(
    State(interpreter): State<Interpreter<S>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResult>, (StatusCode, String)> {
    // the core assumes non-empty normalized text; reject blanks here
    if request.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "query is required".to_string()));
    }

    let today = OffsetDateTime::now_utc().date();
    interpreter
        .process_query(&request.query, today)
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to read market data".to_string(),
            )
        })
}
