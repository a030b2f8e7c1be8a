//! Google Calendar event source.

use chrono::Utc;
use eventboard_core::EventRecord;
use tracing::{debug, warn};

use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;
use crate::error::FetchResult;
use crate::normalize::normalize_events;
use crate::provider::{BoxFuture, EventSource, FetchOptions};

/// Fetches upcoming events from a public Google Calendar.
#[derive(Debug)]
pub struct GoogleCalendarSource {
    client: GoogleCalendarClient,
}

impl GoogleCalendarSource {
    /// Creates a new source from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(config: GoogleConfig) -> FetchResult<Self> {
        Ok(Self {
            client: GoogleCalendarClient::new(config)?,
        })
    }

    /// Returns the calendar this source reads from.
    pub fn calendar_id(&self) -> &str {
        &self.client.config().calendar_id
    }

    async fn fetch_impl(&self, options: FetchOptions) -> FetchResult<Vec<EventRecord>> {
        let time_min = options.resolve_time_min(Utc::now());
        let list = self
            .client
            .list_events(time_min, options.max_results)
            .await?;

        let mut records = normalize_events(&list.items).inspect_err(|e| {
            warn!(calendar_id = %self.calendar_id(), "unusable event listing: {}", e);
        })?;

        if records.len() > options.max_results {
            warn!(
                "service returned {} events, keeping the first {}",
                records.len(),
                options.max_results
            );
            records.truncate(options.max_results);
        }

        debug!("normalized {} upcoming events", records.len());
        Ok(records)
    }
}

impl EventSource for GoogleCalendarSource {
    fn name(&self) -> &str {
        "google"
    }

    fn fetch_upcoming(&self, options: FetchOptions) -> BoxFuture<'_, FetchResult<Vec<EventRecord>>> {
        Box::pin(self.fetch_impl(options))
    }
}

/// Fetches up to 50 upcoming events of a public calendar.
///
/// Builds a one-shot [`GoogleCalendarSource`] with default settings and
/// performs a single fetch.
///
/// # Errors
///
/// - [`FetchErrorKind::Transport`](crate::FetchErrorKind::Transport) when the
///   service cannot be reached or the exchange is cut short
/// - [`FetchErrorKind::RemoteRejected`](crate::FetchErrorKind::RemoteRejected)
///   when the service answers with a non-success status
/// - [`FetchErrorKind::MalformedResponse`](crate::FetchErrorKind::MalformedResponse)
///   when the body is not a usable event listing
pub async fn fetch_events(calendar_id: &str, credential: &str) -> FetchResult<Vec<EventRecord>> {
    fetch_events_with(GoogleConfig::new(calendar_id, credential)).await
}

/// Like [`fetch_events`], against an explicit configuration.
pub async fn fetch_events_with(config: GoogleConfig) -> FetchResult<Vec<EventRecord>> {
    GoogleCalendarSource::new(config)?
        .fetch_upcoming(FetchOptions::new())
        .await
}
