//! The default command: list upcoming events.
//!
//! Any failure to obtain the events is logged and rendered as the empty
//! state; the page never shows an error to its reader.

use std::time::Duration;

use chrono::{Local, TimeZone};
use eventboard_core::{EventRecord, OutputFormat, OutputFormatter};
use eventboard_providers::{EventSource, FetchOptions};
use tracing::{debug, warn};

use crate::config::{CalendarSettings, DisplaySettings};
use crate::error::{ClientError, ClientResult};

/// Builds the event source for the configured calendar.
///
/// # Errors
///
/// Returns a configuration error if the calendar id or API key is missing or
/// cannot be resolved.
pub fn build_source(settings: &CalendarSettings) -> ClientResult<Box<dyn EventSource>> {
    #[cfg(feature = "google")]
    {
        use eventboard_providers::ErrorSource;
        use eventboard_providers::google::GoogleCalendarSource;

        let config = settings.to_source_config().map_err(ClientError::Config)?;
        match GoogleCalendarSource::new(config) {
            Ok(source) => Ok(Box::new(source)),
            Err(e) => {
                warn!("failed to create Google Calendar source: {}", e);
                Ok(Box::new(ErrorSource::new("google", e)))
            }
        }
    }

    #[cfg(not(feature = "google"))]
    {
        use eventboard_providers::{ErrorSource, FetchError};

        settings.require_calendar_id().map_err(ClientError::Config)?;
        Ok(Box::new(ErrorSource::new(
            "google",
            FetchError::transport("built without Google Calendar support"),
        )))
    }
}

/// Fetches upcoming events, giving up after `timeout`.
pub async fn fetch(source: &dyn EventSource, timeout: Duration) -> ClientResult<Vec<EventRecord>> {
    debug!(source = source.name(), ?timeout, "fetching upcoming events");

    let records = tokio::time::timeout(timeout, source.fetch_upcoming(FetchOptions::new()))
        .await
        .map_err(|_| {
            ClientError::Timeout(format!(
                "{} did not answer within {}s",
                source.name(),
                timeout.as_secs()
            ))
        })??;

    debug!("received {} upcoming events", records.len());
    Ok(records)
}

/// Fetches the listing to display under the configured deadline.
///
/// # Errors
///
/// Only fatal errors are returned, a zero timeout among them. Everything
/// else degrades to the empty state.
pub async fn upcoming(
    source: &dyn EventSource,
    settings: &CalendarSettings,
) -> ClientResult<Vec<EventRecord>> {
    let timeout = settings.require_timeout().map_err(ClientError::Config)?;
    or_empty(fetch(source, timeout).await)
}

/// Turns a fetch outcome into the list to display.
///
/// Non-fatal errors are logged and replaced by an empty list.
pub fn or_empty(result: ClientResult<Vec<EventRecord>>) -> ClientResult<Vec<EventRecord>> {
    match result {
        Ok(records) => Ok(records),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            match &e {
                ClientError::Fetch(fetch) if fetch.is_retryable() => {
                    warn!(kind = %fetch.kind(), "upcoming events unavailable, try again later: {}", e)
                }
                _ => warn!("upcoming events unavailable: {}", e),
            }
            Ok(Vec::new())
        }
    }
}

/// Renders the list in the local timezone.
pub fn render(
    records: &[EventRecord],
    display: &DisplaySettings,
    format: OutputFormat,
) -> ClientResult<String> {
    render_in(records, display, format, &Local)
}

/// Renders the list in the given timezone.
pub fn render_in<Tz: TimeZone>(
    records: &[EventRecord],
    display: &DisplaySettings,
    format: OutputFormat,
    tz: &Tz,
) -> ClientResult<String> {
    let formatter = OutputFormatter::new(display.format_options());
    match format {
        OutputFormat::Tty => Ok(formatter.render_tty_in(records, &display.no_events_text, tz)),
        OutputFormat::Json => {
            let output = formatter.format_json_in(records, tz);
            serde_json::to_string_pretty(&output).map_err(|e| ClientError::Io(e.into()))
        }
    }
}
