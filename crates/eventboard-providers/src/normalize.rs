//! RawEvent to EventRecord conversion.
//!
//! Normalization is a straight reshaping of each item:
//! 1. title, location and description are copied verbatim, absence preserved
//! 2. start and end are each resolved on their own, preferring `dateTime`
//!    over `date`
//! 3. `htmlLink` becomes the record's external link
//!
//! Nothing is filtered, sorted or corrected. An item that cannot be reshaped
//! fails the whole listing with [`FetchErrorKind::MalformedResponse`](crate::FetchErrorKind).

use eventboard_core::{EventRecord, EventTime};

use crate::error::{FetchError, FetchResult};
use crate::raw_event::{RawEvent, RawEventTime};

/// Converts a [`RawEvent`] to an [`EventRecord`].
///
/// # Errors
///
/// Returns a malformed-response error if the item has no usable start or
/// end marker, a marker does not parse, or the item has no `htmlLink`.
pub fn normalize_event(raw: &RawEvent) -> FetchResult<EventRecord> {
    let start = resolve_time(raw.start.as_ref(), "start", raw)?;
    let end = resolve_time(raw.end.as_ref(), "end", raw)?;

    let external_link = raw.html_link.clone().ok_or_else(|| {
        FetchError::malformed(format!("event {} has no htmlLink", raw.label()))
    })?;

    Ok(EventRecord {
        title: raw.summary.clone(),
        location: raw.location.clone(),
        description: raw.description.clone(),
        start,
        end,
        external_link,
    })
}

/// Normalizes a whole listing, preserving order.
///
/// Fails on the first item that cannot be normalized; no partial list is
/// returned.
pub fn normalize_events(raw_events: &[RawEvent]) -> FetchResult<Vec<EventRecord>> {
    raw_events.iter().map(normalize_event).collect()
}

/// Resolves one boundary marker into an [`EventTime`].
fn resolve_time(
    marker: Option<&RawEventTime>,
    which: &str,
    raw: &RawEvent,
) -> FetchResult<EventTime> {
    let marker = marker.ok_or_else(|| {
        FetchError::malformed(format!("event {} has no {} marker", raw.label(), which))
    })?;

    let (parsed, shape, value) = match (&marker.date_time, &marker.date) {
        (Some(value), _) => (EventTime::parse_date_time(value), "dateTime", value),
        (None, Some(value)) => (EventTime::parse_date(value), "date", value),
        (None, None) => {
            return Err(FetchError::malformed(format!(
                "event {} has neither dateTime nor date for {}",
                raw.label(),
                which
            )));
        }
    };

    parsed.map_err(|e| {
        FetchError::malformed(format!(
            "event {} has an invalid {} {} {:?}",
            raw.label(),
            which,
            shape,
            value
        ))
        .with_source(e)
    })
}
