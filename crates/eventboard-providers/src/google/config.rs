//! Google Calendar source configuration.

use std::fmt;
use std::time::Duration;

/// Base URL for Google Calendar API v3.
pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Configuration for the Google Calendar source.
///
/// The calendar must be public: requests authenticate with an API key only.
#[derive(Clone)]
pub struct GoogleConfig {
    /// The calendar identifier (e.g., `abc123@group.calendar.google.com`).
    pub calendar_id: String,

    /// The API key sent as the `key` query parameter.
    ///
    /// Never logged; `Debug` prints it redacted.
    pub api_key: String,

    /// Base URL of the Calendar API, without a trailing slash.
    pub base_url: String,

    /// Request timeout.
    ///
    /// `None` leaves the request unbounded; callers then apply their own.
    pub timeout: Option<Duration>,

    /// User agent string for API requests.
    pub user_agent: String,
}

impl GoogleConfig {
    /// Creates a new configuration for a calendar and credential.
    pub fn new(calendar_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            api_key: api_key.into(),
            base_url: CALENDAR_API_BASE.to_string(),
            timeout: None,
            user_agent: format!("eventboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the events listing URL for the configured calendar.
    ///
    /// The calendar id is percent-encoded into a single path segment.
    pub fn events_url(&self) -> String {
        format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(&self.calendar_id)
        )
    }

    /// Validates that the configuration can be used for a request.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.calendar_id.trim().is_empty() {
            return Err("calendar_id is required");
        }
        if self.api_key.trim().is_empty() {
            return Err("api_key is required");
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err("base_url is not a valid URL");
        }
        Ok(())
    }
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("calendar_id", &self.calendar_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
