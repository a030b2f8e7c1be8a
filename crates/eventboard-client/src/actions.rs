//! Event actions: open the calendar link or the map search in a browser.

use eventboard_core::EventRecord;
use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Opens the "add to calendar" link of the event at 1-based `position`.
pub fn open_event_link(records: &[EventRecord], position: usize) -> ClientResult<()> {
    let record = event_at(records, position)?;
    info!(url = %record.external_link, "opening event link");
    open_url(&record.external_link)
}

/// Opens the map search for the location of the event at 1-based `position`.
pub fn open_map(records: &[EventRecord], position: usize) -> ClientResult<()> {
    let record = event_at(records, position)?;
    let url = record.maps_url().ok_or_else(|| {
        ClientError::Action(format!("event {} has no location", position))
    })?;
    info!(url = %url, "opening map search");
    open_url(&url)
}

fn open_url(url: &str) -> ClientResult<()> {
    open::that(url).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))
}

/// Looks up the event at a 1-based position in the listing.
fn event_at(records: &[EventRecord], position: usize) -> ClientResult<&EventRecord> {
    if records.is_empty() {
        return Err(ClientError::Action("no upcoming events".into()));
    }
    position
        .checked_sub(1)
        .and_then(|i| records.get(i))
        .ok_or_else(|| {
            ClientError::Action(format!(
                "no event at position {} (1 to {} listed)",
                position,
                records.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use eventboard_core::EventTime;

    fn record(title: &str) -> EventRecord {
        let day = EventTime::from_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        EventRecord::new(day.clone(), day, format!("https://calendar.example/{}", title))
            .with_title(title)
    }

    #[test]
    fn positions_are_one_based() {
        let records = vec![record("first"), record("second")];
        assert_eq!(
            event_at(&records, 1).unwrap().title.as_deref(),
            Some("first")
        );
        assert_eq!(
            event_at(&records, 2).unwrap().title.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn out_of_range_positions_error() {
        let records = vec![record("only")];
        assert!(event_at(&records, 0).is_err());
        let err = event_at(&records, 2).unwrap_err();
        assert!(err.to_string().contains("1 to 1"));
    }

    #[test]
    fn empty_listing_errors() {
        let err = event_at(&[], 1).unwrap_err();
        assert!(err.to_string().contains("no upcoming events"));
    }

    #[test]
    fn map_requires_location() {
        let records = vec![record("nowhere")];
        let err = open_map(&records, 1).unwrap_err();
        assert!(err.to_string().contains("has no location"));
    }
}
