use serde::{Deserialize, Serialize};
use time::Date;

/// Which side of the grid a schedule record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Drawal scheduled by a distribution company (discom)
    Load,
    /// Output scheduled by a generator
    Generation,
}

/// One load or generation observation for a single day and entity.
///
/// Depending on [`ScheduleKind`], `entity` names a discom or a generator.
/// The `actual` quantity is only known after the fact and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// The discom or generator the schedule belongs to
    pub entity: String,
    /// The delivery day
    #[serde(with = "super::iso_date")]
    pub date: Date,
    /// Block number within the day, 1-based
    pub block: i64,
    /// Scheduled quantity, MWh
    pub scheduled: f64,
    /// Metered quantity, MWh, if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
}
