use super::Market;
use serde::{Deserialize, Serialize};
use time::Date;

/// One day's clearing statistics for a single market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMarketSummary {
    /// The trading day
    #[serde(with = "super::iso_date")]
    pub date: Date,
    /// The market the statistics cover
    pub product: Market,
    /// Volume-weighted average clearing price, rounded to 2 decimals
    pub weighted_avg_price: f64,
    /// Total cleared volume, MWh
    pub total_volume: f64,
    /// Lowest clearing price of the day
    pub min_price: f64,
    /// Highest clearing price of the day
    pub max_price: f64,
}

/// One discom's drawal statistics for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscomLoadSummary {
    /// The delivery day
    #[serde(with = "super::iso_date")]
    pub date: Date,
    /// The distribution company
    pub discom: String,
    /// Sum of scheduled drawal over the day's blocks, MWh
    pub total_scheduled_demand: f64,
    /// Sum of metered drawal, `None` when no block has been metered yet
    pub total_actual_demand: Option<f64>,
    /// The block with the highest scheduled drawal
    pub peak_demand_block: i64,
    /// That block's scheduled drawal, MWh
    pub peak_demand_value: f64,
}
