//! Upcoming-event fetching and normalization.
//!
//! This crate turns a calendar service's event listing into
//! [`EventRecord`](eventboard_core::EventRecord)s ready for display:
//!
//! - [`EventSource`] - The trait every event source implements
//! - [`RawEvent`] - An event item as the service returned it
//! - [`normalize_event`] - Reshapes a raw item into an `EventRecord`
//! - [`FetchError`] - Error type carrying a [`FetchErrorKind`]
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  Google Calendar API │
//! └──────────┬───────────┘
//!            │ GET events.list
//!            ▼
//! ┌──────────────────────┐
//! │ GoogleCalendarClient │ ──▶ RawEventList
//! └──────────┬───────────┘
//!            │
//!            ▼ normalize_events()
//! ┌──────────────────────┐
//! │ GoogleCalendarSource │ ──▶ Vec<EventRecord>
//! └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use eventboard_providers::{EventSource, FetchOptions};
//! use eventboard_providers::google::{GoogleCalendarSource, GoogleConfig};
//!
//! let source = GoogleCalendarSource::new(GoogleConfig::new(calendar_id, api_key))?;
//! let events = source.fetch_upcoming(FetchOptions::new()).await?;
//! ```

pub mod error;
#[cfg(feature = "google")]
pub mod google;
pub mod normalize;
pub mod provider;
pub mod raw_event;

// Re-export main types at crate root
pub use error::{FetchError, FetchErrorKind, FetchResult};
pub use normalize::{normalize_event, normalize_events};
pub use provider::{BoxFuture, ErrorSource, EventSource, FetchOptions, MAX_RESULTS};
pub use raw_event::{RawEvent, RawEventList, RawEventTime};
