//! Google Calendar API client.
//!
//! A thin HTTP client for the `events.list` endpoint of a public calendar:
//! one GET per call, authenticated with an API key, no paging.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::config::GoogleConfig;
use crate::error::{FetchError, FetchResult};
use crate::raw_event::RawEventList;

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleCalendarClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(config: GoogleConfig) -> FetchResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            FetchError::transport(format!("failed to create HTTP client: {}", e)).with_source(e)
        })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &GoogleConfig {
        &self.config
    }

    /// Lists upcoming events of the configured calendar.
    ///
    /// Sends `timeMin`, `orderBy=startTime`, `singleEvents=true` and
    /// `maxResults` so the service expands recurring events, drops events that
    /// already ended and sorts by start.
    pub async fn list_events(
        &self,
        time_min: DateTime<Utc>,
        max_results: usize,
    ) -> FetchResult<RawEventList> {
        let url = self.config.events_url();
        let time_min = time_min.to_rfc3339_opts(SecondsFormat::Millis, true);

        debug!(
            calendar_id = %self.config.calendar_id,
            time_min = %time_min,
            max_results,
            "listing upcoming events"
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("timeMin", time_min.as_str()),
                ("orderBy", "startTime"),
                ("singleEvents", "true"),
            ])
            .query(&[("maxResults", max_results.to_string())])
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request rejected").to_string());
            warn!(status = status.as_u16(), "calendar service rejected the request: {}", message);
            return Err(FetchError::rejected(status.as_u16(), message));
        }

        let body = response.text().await.map_err(|e| {
            FetchError::transport(format!("failed to read response: {}", e)).with_source(e)
        })?;

        let list: RawEventList = serde_json::from_str(&body).map_err(|e| {
            FetchError::malformed(format!("failed to parse response: {}", e)).with_source(e)
        })?;

        debug!(
            "fetched {} events from calendar {}",
            list.items.len(),
            self.config.calendar_id
        );
        Ok(list)
    }
}

fn map_send_error(e: reqwest::Error) -> FetchError {
    let message = if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        format!("request failed: {}", e)
    };
    FetchError::transport(message).with_source(e)
}

/// Error body returned by Google APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Extracts the human-readable message from a Google error body.
fn api_error_message(body: &str) -> Option<String> {
    let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.message.filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_google_error_body() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "errors": [{ "reason": "badRequest" }]
            }
        }"#;
        assert_eq!(
            api_error_message(body).as_deref(),
            Some("API key not valid. Please pass a valid API key.")
        );
    }

    #[test]
    fn non_json_error_body_has_no_message() {
        assert_eq!(api_error_message("<html>Not Found</html>"), None);
        assert_eq!(api_error_message(r#"{"error":{"code":500}}"#), None);
    }

    #[test]
    fn client_keeps_config() {
        let config = GoogleConfig::new("cal", "k").with_base_url("http://localhost:1");
        let client = GoogleCalendarClient::new(config).unwrap();
        assert_eq!(client.config().calendar_id, "cal");
    }
}
