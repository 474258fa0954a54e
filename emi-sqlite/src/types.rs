//! Type definitions for the SQLite adapter.
//!
//! The public types here are the write-side records the seeding command
//! and tests insert; the crate-private ones map database rows back onto
//! the core models.

use emi_core::models::{Market, MarketRecord, ScheduleRecord};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// A market clearing observation to insert, one 15-minute block.
#[derive(Debug, Clone)]
pub struct NewMarketRecord {
    /// Which market the block cleared in
    pub market: Market,
    /// Start of the block
    pub timestamp: OffsetDateTime,
    /// Block number within the trading day, 1-based
    pub block: i64,
    /// Market clearing price
    pub mcp: f64,
    /// Market clearing volume
    pub mcv: f64,
}

/// A load or generation schedule entry to insert, one block.
#[derive(Debug, Clone)]
pub struct NewScheduleRecord {
    /// The owning discom or generator
    pub entity: String,
    /// The delivery day
    pub date: Date,
    /// Block number within the day, 1-based
    pub block: i64,
    /// Scheduled quantity, MWh
    pub scheduled: f64,
    /// Metered quantity, MWh, if known
    pub actual: Option<f64>,
}

#[derive(sqlx::FromRow)]
pub(crate) struct MarketRow {
    pub product: String,
    pub timestamp: OffsetDateTime,
    pub mcp: f64,
    pub mcv: f64,
}

impl TryFrom<MarketRow> for MarketRecord {
    type Error = crate::Error;

    fn try_from(row: MarketRow) -> Result<Self, Self::Error> {
        let market = Market::from_str(&row.product)
            .map_err(|_| crate::Error::UnknownMarket(row.product))?;
        Ok(MarketRecord {
            market,
            timestamp: row.timestamp,
            price: row.mcp,
            volume: row.mcv,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ScheduleRow {
    pub entity: String,
    pub date: Date,
    pub block: i64,
    pub scheduled: f64,
    pub actual: Option<f64>,
}

impl From<ScheduleRow> for ScheduleRecord {
    fn from(row: ScheduleRow) -> Self {
        ScheduleRecord {
            entity: row.entity,
            date: row.date,
            block: row.block,
            scheduled: row.scheduled,
            actual: row.actual,
        }
    }
}
