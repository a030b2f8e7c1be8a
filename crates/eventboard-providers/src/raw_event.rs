//! Raw event listing as returned by the calendar service.
//!
//! These types mirror the JSON body of the Google Calendar `events.list`
//! endpoint. Only the fields this crate reads are declared; anything else in
//! the body is ignored. Shapes are kept loose (`Option` everywhere except the
//! `items` array) so that [`normalize_event`](crate::normalize::normalize_event)
//! can report exactly which part of an item is unusable.

use serde::{Deserialize, Serialize};

/// Response body of the events listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventList {
    /// The events, in the order the service sorted them.
    ///
    /// Required: a body without it is not an event listing.
    pub items: Vec<RawEvent>,
    /// The calendar's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// The calendar's IANA timezone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Present when more results exist beyond the requested cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// A single event item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The event title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<RawEventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<RawEventTime>,
    /// Link to the event in the calendar web UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    /// Set on occurrences produced by recurrence expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_event_id: Option<String>,
}

/// A start or end marker.
///
/// Timed events carry `dateTime` (RFC 3339); all-day events carry `date`
/// (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RawEventTime {
    /// A timed marker.
    pub fn date_time(value: impl Into<String>) -> Self {
        Self {
            date_time: Some(value.into()),
            ..Self::default()
        }
    }

    /// An all-day marker.
    pub fn date(value: impl Into<String>) -> Self {
        Self {
            date: Some(value.into()),
            ..Self::default()
        }
    }
}

impl RawEvent {
    /// Creates an item with start, end and link set.
    pub fn new(start: RawEventTime, end: RawEventTime, html_link: impl Into<String>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            html_link: Some(html_link.into()),
            ..Self::default()
        }
    }

    /// A short label for log and error messages.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }

    /// Builder method to set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_list() {
        let json = r#"{
            "kind": "calendar#events",
            "summary": "Community events",
            "timeZone": "America/New_York",
            "items": [
                {
                    "id": "evt1",
                    "status": "confirmed",
                    "summary": "Potluck",
                    "htmlLink": "https://www.google.com/calendar/event?eid=ZXZ0MQ",
                    "start": { "dateTime": "2025-03-08T18:00:00-05:00", "timeZone": "America/New_York" },
                    "end": { "dateTime": "2025-03-08T20:00:00-05:00" }
                }
            ]
        }"#;

        let list: RawEventList = serde_json::from_str(json).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.time_zone.as_deref(), Some("America/New_York"));
        let item = &list.items[0];
        assert_eq!(item.summary.as_deref(), Some("Potluck"));
        assert!(item.location.is_none());
        assert_eq!(
            item.start.as_ref().unwrap().time_zone.as_deref(),
            Some("America/New_York")
        );
    }

    #[test]
    fn parse_all_day_marker() {
        let json = r#"{ "date": "2025-03-15" }"#;
        let time: RawEventTime = serde_json::from_str(json).unwrap();
        assert_eq!(time.date.as_deref(), Some("2025-03-15"));
        assert!(time.date_time.is_none());
    }

    #[test]
    fn missing_items_is_rejected() {
        let json = r#"{ "kind": "calendar#events", "summary": "Community events" }"#;
        assert!(serde_json::from_str::<RawEventList>(json).is_err());
    }

    #[test]
    fn empty_items_is_accepted() {
        let list: RawEventList = serde_json::from_str(r#"{ "items": [] }"#).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn serialized_item_omits_absent_fields() {
        let item = RawEvent::new(
            RawEventTime::date("2025-03-15"),
            RawEventTime::date("2025-03-16"),
            "https://example.com/e",
        );
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("summary").is_none());
        assert_eq!(value["htmlLink"], "https://example.com/e");
        assert_eq!(value["start"]["date"], "2025-03-15");
    }
}
