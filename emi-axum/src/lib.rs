#![warn(missing_docs)]
//! REST API adapter for the electricity-market insights service.
//!
//! Exposes the core interpreter over HTTP: one `POST /query` route for
//! free-text questions, read-only record listings for the raw
//! time-series, daily aggregation summaries, and a health check.
//! Transport encoding lives here; the
//! interpretation and aggregation semantics live entirely in `emi-core`.

mod aggregate_routes;
mod query_routes;
mod record_routes;

pub mod config;
use config::ApiConfig;

use axum::{
    Json, Router,
    routing::{get, post},
};
use emi_core::{interpret::Interpreter, ports::MarketDataSource};
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Everything a data source must satisfy to be served over HTTP.
///
/// Axum imposes its usual bounds on state; this trait, with its blanket
/// implementation, states them once instead of on every handler.
pub trait ApiSource: MarketDataSource + Clone + Send + Sync + 'static {}

impl<T: MarketDataSource + Clone + Send + Sync + 'static> ApiSource for T {}

/// Response for the health check endpoint
#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct the full API router over the given data source.
pub fn router<S: ApiSource>(source: S) -> Router {
    let interpreter = Interpreter::new(source);
    Router::new()
        .route("/health", get(health_check))
        .route("/query", post(query_routes::process_query::<S>))
        .route("/records/market", get(record_routes::list_market_records::<S>))
        .route("/records/load", get(record_routes::list_load_records::<S>))
        .route(
            "/records/generation",
            get(record_routes::list_generation_records::<S>),
        )
        .route(
            "/aggregates/market",
            get(aggregate_routes::market_aggregation::<S>),
        )
        .route(
            "/aggregates/load",
            get(aggregate_routes::load_aggregation::<S>),
        )
        .layer(CorsLayer::permissive())
        .with_state(interpreter)
}

/// Starts the HTTP server with the provided configuration.
pub async fn start_server<S: ApiSource>(
    config: ApiConfig,
    source: S,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("listening for requests on {}", listener.local_addr()?);

    axum::serve(listener, router(source)).await
}
