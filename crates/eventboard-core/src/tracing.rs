//! Logging setup shared by the eventboard crates.
//!
//! Logs always go to stderr; stdout carries only the rendered events.
//!
//! ```ignore
//! use eventboard_core::{TracingConfig, init_tracing};
//!
//! init_tracing(TracingConfig::cli())?;
//! ```

use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Target prefix shared by every eventboard crate (`eventboard_core`,
/// `eventboard_providers`, `eventboard_client`).
const TARGET_PREFIX: &str = "eventboard";

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// A global subscriber was already installed
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// The filter directive does not parse
    #[error("failed to parse log filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),

    /// Unknown output format name
    #[error("unknown log format `{0}` (expected compact, pretty or json)")]
    UnknownFormat(String),
}

/// How log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line, indented
    Pretty,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for TracingOutputFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(TracingError::UnknownFormat(s.to_string())),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level applied to eventboard targets
    pub level: Level,
    /// Line format
    pub format: TracingOutputFormat,
    /// Print target and file:line with each event
    pub show_source: bool,
    /// Print a timestamp with each event
    pub timestamps: bool,
    /// Explicit filter directive, replacing the level-based default
    pub filter: Option<String>,
    /// Let `RUST_LOG` replace the level-based default
    pub honor_rust_log: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingOutputFormat::Compact,
            show_source: false,
            timestamps: true,
            filter: None,
            honor_rust_log: true,
        }
    }
}

impl TracingConfig {
    /// Normal CLI runs: warnings only, no decoration.
    #[must_use]
    pub fn cli() -> Self {
        Self {
            level: Level::WARN,
            timestamps: false,
            ..Self::default()
        }
    }

    /// `--debug` runs: everything from eventboard, with sources, ignoring `RUST_LOG`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            show_source: true,
            timestamps: false,
            honor_rust_log: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Replaces the level-based default with an explicit directive.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// The directive derived from `level`, e.g. `eventboard=warn`.
    pub fn default_directive(&self) -> String {
        format!(
            "{}={}",
            TARGET_PREFIX,
            self.level.as_str().to_ascii_lowercase()
        )
    }

    /// Builds the filter: explicit directive, then `RUST_LOG`, then the level.
    pub fn env_filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(ref filter) = self.filter {
            return Ok(EnvFilter::try_new(filter)?);
        }
        if self.honor_rust_log
            && let Ok(filter) = EnvFilter::try_from_default_env()
        {
            return Ok(filter);
        }
        Ok(EnvFilter::try_new(self.default_directive())?)
    }
}

/// Installs the global subscriber.
///
/// Call once, before the first log event.
///
/// # Errors
///
/// Fails if a global subscriber is already set or the filter does not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.env_filter()?;

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_source)
        .with_file(config.show_source)
        .with_line_number(config.show_source);

    let layer = match (config.format, config.timestamps) {
        (TracingOutputFormat::Compact, true) => base.compact().boxed(),
        (TracingOutputFormat::Compact, false) => base.compact().without_time().boxed(),
        (TracingOutputFormat::Pretty, true) => base.pretty().boxed(),
        (TracingOutputFormat::Pretty, false) => base.pretty().without_time().boxed(),
        (TracingOutputFormat::Json, _) => base.json().boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
