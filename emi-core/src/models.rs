mod clarification;
mod date;
mod intent;
mod market;
mod response;
mod schedule;
mod summary;

pub use clarification::{ClarificationKind, ClarificationOption, ClarificationRequest};
pub use date::{DateRange, InvalidDateRange, iso_date};
pub use intent::Intent;
pub use market::{Market, MarketRecord, ParseMarketError};
pub use response::{AnswerData, QueryResult, TrendPoint};
pub use schedule::{ScheduleKind, ScheduleRecord};
pub use summary::{DailyMarketSummary, DiscomLoadSummary};
