//! Event records handed to the page.
//!
//! This module provides:
//! - [`EventRecord`]: one upcoming event after normalization
//! - [`EventView`]: a record resolved into a display timezone
//!
//! Optional text fields keep their absence so callers can tell "not provided"
//! apart from "provided but empty".

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::time::EventTime;

/// Base URL for map searches built from an event location.
const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// One upcoming event, normalized from the calendar service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The event title (`summary` upstream).
    pub title: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Free-text details.
    pub description: Option<String>,
    /// When the event starts.
    pub start: EventTime,
    /// When the event ends.
    pub end: EventTime,
    /// Link back to the canonical event in the calendar service.
    pub external_link: String,
}

impl EventRecord {
    /// Creates a record with the required fields; optional text is absent.
    pub fn new(start: EventTime, end: EventTime, external_link: impl Into<String>) -> Self {
        Self {
            title: None,
            location: None,
            description: None,
            start,
            end,
            external_link: external_link.into(),
        }
    }

    /// Returns true if the event starts on an all-day marker.
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day()
    }

    /// Returns true if `end` is not strictly before `start`.
    ///
    /// Records are never corrected during normalization; this only lets
    /// callers notice upstream data that breaks the ordering.
    pub fn is_well_ordered(&self) -> bool {
        !self.end.is_before(&self.start)
    }

    /// The short place name: the part of the location before the first comma.
    ///
    /// `None` when that part is empty, as in `", TX"`.
    pub fn location_name(&self) -> Option<&str> {
        self.location
            .as_deref()
            .and_then(|l| l.split(',').next())
            .filter(|name| !name.is_empty())
    }

    /// A map search link for the location, if there is one.
    pub fn maps_url(&self) -> Option<String> {
        self.location
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|l| format!("{}{}", MAPS_SEARCH_BASE, urlencoding::encode(l)))
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An event boundary resolved into a display timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalBoundary {
    /// A precise instant in the display timezone.
    At(DateTime<FixedOffset>),
    /// An all-day marker, left exactly as reported.
    AllDay(NaiveDate),
}

impl LocalBoundary {
    /// Resolves an [`EventTime`] into the given timezone.
    pub fn from_event_time<Tz: TimeZone>(time: &EventTime, tz: &Tz) -> Self {
        match time {
            EventTime::DateTime(dt) => Self::At(dt.with_timezone(tz).fixed_offset()),
            EventTime::AllDay(date) => Self::AllDay(*date),
        }
    }

    /// The calendar date of this boundary.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::At(dt) => dt.date_naive(),
            Self::AllDay(date) => *date,
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }
}

impl fmt::Display for LocalBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::AllDay(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// A display-ready view of an [`EventRecord`].
///
/// Precise boundaries are shifted into the display timezone; all-day markers
/// are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    pub title: Option<String>,
    pub start: LocalBoundary,
    pub end: LocalBoundary,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Short place name (see [`EventRecord::location_name`]).
    pub location_name: Option<String>,
    pub maps_url: Option<String>,
    pub external_link: String,
}

impl EventView {
    /// Creates a view of the record in the given timezone.
    pub fn from_record<Tz: TimeZone>(record: &EventRecord, tz: &Tz) -> Self {
        Self {
            title: record.title.clone(),
            start: LocalBoundary::from_event_time(&record.start, tz),
            end: LocalBoundary::from_event_time(&record.end, tz),
            description: record.description.clone(),
            location: record.location.clone(),
            location_name: record.location_name().map(String::from),
            maps_url: record.maps_url(),
            external_link: record.external_link.clone(),
        }
    }
}
