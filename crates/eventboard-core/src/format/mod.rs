//! Output formatting for upcoming events.
//!
//! This module turns [`EventRecord`]s into what the page shows for each card:
//! - a date badge (`MAR` / `8`) and the weekday of the start
//! - the time range (`6:00pm – 8:00pm`, or `All day`)
//! - description, location with a map link, and an "add to calendar" link
//!
//! Two renderings are provided:
//! - **TTY**: human-readable cards with optional OSC8 hyperlinks
//! - **JSON**: machine-readable output carrying the same display strings
//!
//! # Example
//!
//! ```rust
//! use eventboard_core::format::{FormatOptions, OutputFormatter};
//! use eventboard_core::EventRecord;
//!
//! let formatter = OutputFormatter::new(FormatOptions::default());
//! let records: Vec<EventRecord> = Vec::new();
//! let text = formatter.render_tty(&records, "No upcoming events");
//! assert_eq!(text, "No upcoming events");
//! ```

use std::borrow::Cow;
use std::fmt;

use chrono::{Datelike, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::event::{EventRecord, EventView, LocalBoundary};

/// Text shown when there is nothing to list.
pub const DEFAULT_NO_EVENTS_TEXT: &str = "No upcoming events at this time. Check back soon!";

/// The output format for event display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    /// 12-hour clock with a lowercase suffix (e.g., "6:00pm").
    #[default]
    #[serde(rename = "12h")]
    H12,
    /// 24-hour clock (e.g., "18:00").
    #[serde(rename = "24h")]
    H24,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for titles (truncated with ellipsis).
    pub max_title_length: Option<usize>,
    /// Whether to emit OSC8 hyperlinks in TTY output.
    pub hyperlinks: bool,
    /// Clock style for time ranges.
    pub time_format: TimeFormat,
    /// Whether to include the description line in TTY cards.
    pub show_description: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_title_length: None,
            hyperlinks: true,
            time_format: TimeFormat::H12,
            show_description: true,
        }
    }
}

/// The month/day badge shown at the side of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBadge {
    /// Upper-case abbreviated month (e.g., "MAR").
    pub month: String,
    /// Day of the month.
    pub day: u32,
}

impl fmt::Display for DateBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.day)
    }
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// The formatted events, in the order received.
    pub events: Vec<JsonEvent>,
    /// Number of events returned.
    pub count: usize,
}

/// A single event in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEvent {
    /// Event title (may be truncated).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Start as RFC 3339, or `YYYY-MM-DD` for an all-day marker.
    pub start: String,
    /// End as RFC 3339, or `YYYY-MM-DD` for an all-day marker.
    pub end: String,
    /// Whether the event starts on an all-day marker.
    pub is_all_day: bool,
    /// Date badge of the start.
    pub badge: DateBadge,
    /// Full weekday name of the start.
    pub weekday: String,
    /// Formatted time range.
    pub time_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    /// Link back to the event in the calendar service.
    pub external_link: String,
}

/// A formatted card with the view it was built from.
#[derive(Debug, Clone)]
pub struct FormattedEvent {
    /// The card text, possibly spanning several lines.
    pub text: String,
    /// The underlying view.
    pub view: EventView,
}

/// Output formatter for event cards.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new OutputFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// Formats records as TTY cards in the local timezone.
    pub fn format_tty(&self, records: &[EventRecord]) -> Vec<FormattedEvent> {
        self.format_tty_in(records, &Local)
    }

    /// Formats records as TTY cards in the given timezone.
    ///
    /// This variant is useful for testing with a fixed offset.
    pub fn format_tty_in<Tz: TimeZone>(
        &self,
        records: &[EventRecord],
        tz: &Tz,
    ) -> Vec<FormattedEvent> {
        records
            .iter()
            .map(|r| {
                let view = EventView::from_record(r, tz);
                FormattedEvent {
                    text: self.format_card(&view),
                    view,
                }
            })
            .collect()
    }

    /// Renders the whole list for a terminal, or the empty-state text.
    pub fn render_tty(&self, records: &[EventRecord], no_events_text: &str) -> String {
        self.render_tty_in(records, no_events_text, &Local)
    }

    /// Renders the whole list in the given timezone.
    pub fn render_tty_in<Tz: TimeZone>(
        &self,
        records: &[EventRecord],
        no_events_text: &str,
        tz: &Tz,
    ) -> String {
        if records.is_empty() {
            return no_events_text.to_string();
        }

        self.format_tty_in(records, tz)
            .into_iter()
            .map(|f| f.text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Formats records as JSON output in the local timezone.
    pub fn format_json(&self, records: &[EventRecord]) -> JsonOutput {
        self.format_json_in(records, &Local)
    }

    /// Formats records as JSON output in the given timezone.
    pub fn format_json_in<Tz: TimeZone>(&self, records: &[EventRecord], tz: &Tz) -> JsonOutput {
        let events: Vec<JsonEvent> = records
            .iter()
            .map(|r| self.to_json_event(&EventView::from_record(r, tz)))
            .collect();

        JsonOutput {
            count: events.len(),
            events,
        }
    }

    /// Builds the month/day badge for the start of an event.
    pub fn date_badge(&self, view: &EventView) -> DateBadge {
        let date = view.start.date();
        DateBadge {
            month: date.format("%b").to_string().to_uppercase(),
            day: date.day(),
        }
    }

    /// Returns the full weekday name of the start.
    pub fn weekday(&self, view: &EventView) -> String {
        view.start.date().format("%A").to_string()
    }

    /// Formats the time range of an event.
    ///
    /// Two all-day markers render as `All day`. A timed end on a later day
    /// than the start carries its date; an all-day boundary mixed with a
    /// timed one renders as its date.
    pub fn time_range(&self, view: &EventView) -> String {
        match (&view.start, &view.end) {
            (LocalBoundary::AllDay(_), LocalBoundary::AllDay(_)) => "All day".to_string(),
            (start, end) => {
                let start_str = self.format_boundary(start, false);
                let show_date = start.date() != end.date();
                let end_str = self.format_boundary(end, show_date);
                format!("{} – {}", start_str, end_str)
            }
        }
    }

    fn format_boundary(&self, boundary: &LocalBoundary, with_date: bool) -> String {
        match boundary {
            LocalBoundary::AllDay(date) => date.format("%b %-d").to_string(),
            LocalBoundary::At(dt) => {
                let time = match self.options.time_format {
                    TimeFormat::H12 => dt.format("%-I:%M%P").to_string(),
                    TimeFormat::H24 => dt.format("%H:%M").to_string(),
                };
                if with_date {
                    format!("{} {}", dt.format("%b %-d"), time)
                } else {
                    time
                }
            }
        }
    }

    /// Formats a single card.
    fn format_card(&self, view: &EventView) -> String {
        let mut lines = Vec::new();

        let mut heading = format!("{} · {}", self.date_badge(view), self.weekday(view));
        if let Some(ref title) = view.title {
            heading.push_str(" · ");
            heading.push_str(&self.truncate_title(title));
        }
        lines.push(heading);
        lines.push(self.time_range(view));

        if self.options.show_description
            && let Some(ref description) = view.description
            && !description.trim().is_empty()
        {
            lines.push(description.trim().to_string());
        }

        if let (Some(name), Some(url)) = (&view.location_name, &view.maps_url) {
            if self.options.hyperlinks {
                lines.push(format!("Location: {}", make_hyperlink(url, name)));
            } else {
                lines.push(format!("Location: {} <{}>", name, url));
            }
        }

        if self.options.hyperlinks {
            lines.push(make_hyperlink(&view.external_link, "Add to calendar"));
        } else {
            lines.push(format!("Add to calendar: {}", view.external_link));
        }

        lines.join("\n")
    }

    /// Truncates a title to the configured maximum length.
    fn truncate_title<'a>(&self, title: &'a str) -> Cow<'a, str> {
        if let Some(max_len) = self.options.max_title_length {
            ellipsis(title, max_len)
        } else {
            Cow::Borrowed(title)
        }
    }

    /// Converts an EventView to JsonEvent.
    fn to_json_event(&self, view: &EventView) -> JsonEvent {
        JsonEvent {
            title: view
                .title
                .as_deref()
                .map(|t| self.truncate_title(t).into_owned()),
            start: view.start.to_string(),
            end: view.end.to_string(),
            is_all_day: view.start.is_all_day(),
            badge: self.date_badge(view),
            weekday: self.weekday(view),
            time_display: self.time_range(view),
            description: view.description.clone(),
            location: view.location.clone(),
            location_name: view.location_name.clone(),
            maps_url: view.maps_url.clone(),
            external_link: view.external_link.clone(),
        }
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
///
/// The result never exceeds `max_len` characters; below 4 there is no room
/// for the dots and the string is cut short instead.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    let char_count = s.chars().count();

    if char_count <= max_len {
        return Cow::Borrowed(s);
    }

    if max_len <= 3 {
        return Cow::Owned(s.chars().take(max_len).collect());
    }

    let truncated: String = s.chars().take(max_len - 3).collect();
    Cow::Owned(format!("{}...", truncated))
}

/// Creates an OSC8 hyperlink for terminal output.
///
/// This creates an ANSI escape sequence that modern terminals interpret as a clickable link.
pub fn make_hyperlink(url: &str, label: &str) -> String {
    // OSC8 hyperlink format: \e]8;;URL\e\\LABEL\e]8;;\e\\
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, label)
}
