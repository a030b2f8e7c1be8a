//! Event boundaries.
//!
//! The calendar service reports each start or end in one of two shapes:
//! a precise instant (`dateTime`, RFC 3339) or a bare calendar date (`date`,
//! `YYYY-MM-DD`) for all-day events. [`EventTime`] keeps that distinction.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, ParseResult, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Wire format of an all-day marker.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The start or end boundary of a calendar event.
///
/// Start and end of the same event are resolved independently, so a record
/// may carry one of each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// A precise instant, stored in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day marker. Never shifted between timezones.
    AllDay(NaiveDate),
}

impl EventTime {
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Parses an RFC 3339 timestamp, keeping the instant it names.
    pub fn parse_date_time(value: &str) -> ParseResult<Self> {
        DateTime::parse_from_rfc3339(value).map(|dt| Self::DateTime(dt.with_timezone(&Utc)))
    }

    /// Parses a `YYYY-MM-DD` all-day marker.
    pub fn parse_date(value: &str) -> ParseResult<Self> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map(Self::AllDay)
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    pub fn is_datetime(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            Self::AllDay(_) => None,
        }
    }

    /// Instant used for ordering; all-day markers count from midnight UTC.
    fn sort_key(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::AllDay(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Returns true if this boundary comes strictly before `other`.
    pub fn is_before(&self, other: &EventTime) -> bool {
        self < other
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Same text as the wire: RFC 3339 in UTC, or `YYYY-MM-DD`.
impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::AllDay(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}
