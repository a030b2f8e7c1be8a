//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventboard/config.toml` by default.
//!
//! The `api_key` value supports secret references:
//! - `env::VAR_NAME` resolved from the environment
//! - `pass::path/in/store` resolved via `pass show`
//! - plain text used as-is

use std::path::{Path, PathBuf};
use std::time::Duration;

use eventboard_core::{DEFAULT_NO_EVENTS_TEXT, FormatOptions, TimeFormat};
use serde::{Deserialize, Serialize};

use crate::secret::SecretRef;

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the eventboard client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Which calendar to read and how.
    pub calendar: CalendarSettings,

    /// Display settings.
    pub display: DisplaySettings,
}

/// Calendar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Public calendar identifier.
    pub calendar_id: Option<String>,

    /// API key (supports `env::` and `pass::` prefixes).
    pub api_key: Option<String>,

    /// Deadline for one fetch, in seconds.
    pub timeout: u64,

    /// Calendar API base URL, for pointing at a proxy or a test server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            calendar_id: None,
            api_key: None,
            timeout: 10,
            base_url: None,
        }
    }
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum title length (truncated with ellipsis).
    pub max_title_length: Option<usize>,

    /// Text to show when there are no upcoming events.
    pub no_events_text: String,

    /// Clock used for time ranges.
    pub time_format: TimeFormat,

    /// Emit OSC8 hyperlinks in terminal output.
    pub hyperlinks: bool,

    /// Include the description line on each card.
    pub show_description: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_title_length: None,
            no_events_text: DEFAULT_NO_EVENTS_TEXT.to_string(),
            time_format: TimeFormat::H12,
            hyperlinks: true,
            show_description: true,
        }
    }
}

impl DisplaySettings {
    /// Converts to formatter options.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_title_length: self.max_title_length,
            hyperlinks: self.hyperlinks,
            time_format: self.time_format,
            show_description: self.show_description,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventboard")
    }
}

// ---------------------------------------------------------------------------
// CalendarSettings resolution
// ---------------------------------------------------------------------------

impl CalendarSettings {
    /// Returns the fetch deadline. Zero would time out every fetch.
    pub fn require_timeout(&self) -> Result<Duration, String> {
        if self.timeout == 0 {
            return Err("calendar timeout must be at least 1 second".to_string());
        }
        Ok(Duration::from_secs(self.timeout))
    }

    /// Returns the calendar id, or an error explaining where to set it.
    pub fn require_calendar_id(&self) -> Result<&str, String> {
        self.calendar_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                format!(
                    "calendar_id is not set. Add to {}:\n  \
                     [calendar]\n  \
                     calendar_id = \"YOUR_CALENDAR@group.calendar.google.com\"\n\n  \
                     Or pass --calendar-id / set EVENTBOARD_CALENDAR_ID",
                    ClientConfig::default_path().display()
                )
            })
    }

    /// Resolves the API key, expanding `env::` and `pass::` references.
    pub fn resolve_api_key(&self) -> Result<String, String> {
        let raw = self.api_key.as_deref().ok_or_else(|| {
            "api_key is missing from [calendar] section in config.toml \
             (or pass --api-key / set EVENTBOARD_API_KEY)"
                .to_string()
        })?;

        let reference = SecretRef::parse(raw);
        let key = reference
            .resolve()
            .map_err(|e| format!("failed to resolve api_key ({}): {}", reference, e))?;
        if key.trim().is_empty() {
            return Err(format!("api_key ({}) resolved to an empty value", reference));
        }
        Ok(key)
    }

    /// Converts to the Google source configuration.
    #[cfg(feature = "google")]
    pub fn to_source_config(&self) -> Result<eventboard_providers::google::GoogleConfig, String> {
        use eventboard_providers::google::GoogleConfig;

        let calendar_id = self.require_calendar_id()?;
        let api_key = self.resolve_api_key()?;

        let mut config = GoogleConfig::new(calendar_id, api_key);
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        config.validate().map_err(str::to_string)?;

        Ok(config)
    }
}
