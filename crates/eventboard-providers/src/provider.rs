//! EventSource trait definition.
//!
//! An [`EventSource`] is anything that can produce the list of upcoming
//! events for the page. The Google Calendar implementation lives in
//! [`crate::google`]; [`ErrorSource`] stands in when a source cannot be set up.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use eventboard_core::EventRecord;

use crate::error::{FetchError, FetchResult};

/// Upper bound on the number of events returned by one fetch.
pub const MAX_RESULTS: usize = 50;

/// Options for fetching upcoming events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Lower bound for event end times. `None` means "now, at call time".
    pub time_min: Option<DateTime<Utc>>,
    /// Maximum number of events to return, at most [`MAX_RESULTS`].
    pub max_results: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            time_min: None,
            max_results: MAX_RESULTS,
        }
    }
}

impl FetchOptions {
    /// Creates new fetch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to pin the lower time bound.
    pub fn with_time_min(mut self, time_min: DateTime<Utc>) -> Self {
        self.time_min = Some(time_min);
        self
    }

    /// Builder method to set max results, clamped to `1..=MAX_RESULTS`.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max.clamp(1, MAX_RESULTS);
        self
    }

    /// Returns the lower time bound, taking `now` when none was pinned.
    pub fn resolve_time_min(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.time_min.unwrap_or(now)
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so callers can hold a
/// `Box<dyn EventSource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A producer of upcoming events.
///
/// # Implementation Notes
///
/// - One call performs one fetch; implementations keep no state between calls
/// - Records come back in the order the source sorted them (start ascending)
/// - No retries: callers wrap the call if they want them
pub trait EventSource: Send + Sync {
    /// Returns the name of this source (e.g., "google").
    fn name(&self) -> &str;

    /// Fetches upcoming events.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failures, remote rejections and
    /// malformed responses.
    fn fetch_upcoming(&self, options: FetchOptions) -> BoxFuture<'_, FetchResult<Vec<EventRecord>>>;
}

/// A source that always returns an error.
///
/// Used as a placeholder when a source fails to initialize, so the caller can
/// still render its empty state.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: FetchError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: FetchError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl EventSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_upcoming(&self, _options: FetchOptions) -> BoxFuture<'_, FetchResult<Vec<EventRecord>>> {
        // FetchError holds a boxed source and cannot be cloned; rebuild it.
        let error = FetchError::new(self.error.kind(), self.error.message());
        Box::pin(async move { Err(error) })
    }
}
