#![warn(missing_docs)]
//! Core domain for the electricity-market insights service.
//!
//! This crate holds everything the rest of the workspace builds on: the
//! domain models, the port through which time-series data is read, the
//! free-text query interpretation pipeline, and the aggregation engine
//! that turns a resolved query into numbers. It deliberately knows nothing
//! about storage engines or transports; those live in the adapter crates
//! (`emi-sqlite`, `emi-axum`) and plug in through the [`ports`] traits.

/// Core domain models.
///
/// These are primarily data structures with minimal business logic:
/// calendar ranges, market identifiers, the read-only observation records,
/// and the response shapes the interpreter produces.
pub mod models;

/// Interface traits between the domain logic and external adapters.
///
/// The aggregation engine consumes time-series data exclusively through
/// [`ports::MarketDataSource`], so storage backends can be swapped without
/// touching the core and tests can run against in-memory fixtures.
pub mod ports;

/// The query interpretation pipeline.
///
/// Free text goes in, a [`models::QueryResult`] comes out: intent
/// classification, time-range and market extraction, the clarification
/// engine for underspecified queries, and the orchestrator tying it all
/// together.
pub mod interpret;

/// Weighted time-series aggregation over a [`ports::MarketDataSource`].
pub mod aggregate;
