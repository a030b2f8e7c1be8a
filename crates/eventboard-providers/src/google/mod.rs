//! Google Calendar event source.
//!
//! Reads a public calendar through the Calendar API v3 `events.list`
//! endpoint, authenticated with an API key.
//!
//! # Request
//!
//! One GET to `{base}/calendars/{calendarId}/events` with:
//!
//! - `key`: the API key
//! - `timeMin`: the current instant, so events that already ended are dropped
//! - `orderBy=startTime` and `singleEvents=true`: recurring events expanded
//!   into occurrences, sorted by start
//! - `maxResults=50`
//!
//! # Example
//!
//! ```ignore
//! use eventboard_providers::google::fetch_events;
//!
//! let events = fetch_events("community@group.calendar.google.com", &api_key).await?;
//! for event in &events {
//!     println!("{:?} at {:?}", event.title, event.start);
//! }
//! ```

mod client;
mod config;
mod source;

pub use client::GoogleCalendarClient;
pub use config::{CALENDAR_API_BASE, GoogleConfig};
pub use source::{GoogleCalendarSource, fetch_events, fetch_events_with};
