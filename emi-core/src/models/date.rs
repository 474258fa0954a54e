use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// An inclusive range of calendar days.
///
/// Both endpoints are part of the range, so a single-day range has
/// `start == end`. The `start <= end` invariant is enforced by the
/// constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range
    #[serde(with = "iso_date")]
    pub start: Date,
    /// Last day of the range
    #[serde(with = "iso_date")]
    pub end: Date,
}

/// Error returned when a range would have its start after its end.
#[derive(Debug, thiserror::Error)]
#[error("range start {start} is after end {end}")]
pub struct InvalidDateRange {
    /// The offending start day
    pub start: Date,
    /// The offending end day
    pub end: Date,
}

impl DateRange {
    /// Construct a range, validating `start <= end`.
    pub fn new(start: Date, end: Date) -> Result<Self, InvalidDateRange> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(InvalidDateRange { start, end })
        }
    }

    /// The range covering `days_back` days up to and including `end`.
    ///
    /// `days_back == 0` yields the single-day range for `end`. Offsets
    /// that would underflow the calendar saturate at [`Date::MIN`].
    pub fn ending_at(end: Date, days_back: i64) -> Self {
        let start = end
            .checked_sub(Duration::days(days_back.max(0)))
            .unwrap_or(Date::MIN);
        Self { start, end }
    }

    /// Whether `day` falls within the range (inclusive on both ends).
    pub fn contains(&self, day: Date) -> bool {
        self.start <= day && day <= self.end
    }

    /// The difference `end - start` in whole days.
    ///
    /// Note this is the *span*, not the day count: a single-day range has
    /// a span of zero. This mirrors how daily averages are computed.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).whole_days()
    }

    /// Iterate every calendar day in the range, in ascending order.
    pub fn iter_days(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;
        let mut next = Some(self.start);
        std::iter::from_fn(move || {
            let current = next?;
            if current > end {
                return None;
            }
            next = current.next_day();
            Some(current)
        })
    }
}

/// Serde helpers for `YYYY-MM-DD` calendar dates.
///
/// The `time` crate's derived formats are not human readable, so dates
/// cross the wire in this fixed ISO layout instead.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

    /// Serialize a [`Date`] as `YYYY-MM-DD`.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(&FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Deserialize a [`Date`] from `YYYY-MM-DD`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(&text, &FORMAT).map_err(D::Error::custom)
    }

    /// The same format for optional dates.
    pub mod option {
        use super::FORMAT;
        use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
        use time::Date;

        /// Serialize an optional [`Date`] as `YYYY-MM-DD` or null.
        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => {
                    let text = date.format(&FORMAT).map_err(serde::ser::Error::custom)?;
                    serializer.serialize_some(&text)
                }
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional [`Date`] from `YYYY-MM-DD` or null.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let text = Option::<String>::deserialize(deserializer)?;
            text.map(|text| Date::parse(&text, &FORMAT).map_err(D::Error::custom))
                .transpose()
        }
    }
}
