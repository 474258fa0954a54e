use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The two market products whose clearing results we track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    /// Day-Ahead Market
    Dam,
    /// Real-Time Market
    Rtm,
}

impl Market {
    /// The canonical upper-case name of the market.
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Dam => "DAM",
            Market::Rtm => "RTM",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known market.
#[derive(Debug, thiserror::Error)]
#[error("unknown market `{0}`")]
pub struct ParseMarketError(pub String);

impl std::str::FromStr for Market {
    type Err = ParseMarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("dam") {
            Ok(Market::Dam)
        } else if s.eq_ignore_ascii_case("rtm") {
            Ok(Market::Rtm)
        } else {
            Err(ParseMarketError(s.to_owned()))
        }
    }
}

/// One pricing observation: the clearing result of a single market block.
///
/// Records are read-only to the core; the data source produces them and
/// the aggregation engine only ever sums and weighs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    /// Which market the block cleared in
    pub market: Market,
    /// Start of the block
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Market clearing price (MCP), currency per MWh
    pub price: f64,
    /// Market clearing volume (MCV), MWh
    pub volume: f64,
}
