//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eventboard_core::{OutputFormat, TimeFormat, TracingOutputFormat};

use crate::config::ClientConfig;

/// eventboard - Upcoming events of a public calendar
#[derive(Debug, Parser)]
#[command(name = "eventboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "EVENTBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log line format on stderr (compact, pretty, json)
    #[arg(long, env = "EVENTBOARD_LOG_FORMAT", default_value = "compact")]
    pub log_format: TracingOutputFormat,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    // --- Calendar overrides ---
    /// Public calendar identifier
    #[arg(long, env = "EVENTBOARD_CALENDAR_ID")]
    pub calendar_id: Option<String>,

    /// Calendar API key (accepts env:: and pass:: references)
    #[arg(long, env = "EVENTBOARD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Fetch deadline in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    // --- Display options ---
    /// Maximum title length (truncated with ellipsis)
    #[arg(long)]
    pub max_title_length: Option<usize>,

    /// Text to show when there are no upcoming events
    #[arg(long)]
    pub no_events_text: Option<String>,

    /// Clock used for time ranges
    #[arg(long, value_enum)]
    pub time_format: Option<ClockArg>,

    /// Disable OSC8 hyperlinks in terminal output
    #[arg(long)]
    pub no_hyperlinks: bool,

    // --- Action flags ---
    /// Open the calendar link of the Nth listed event (1-based)
    #[arg(long, value_name = "N")]
    pub open: Option<usize>,

    /// Open the map search for the Nth listed event's location (1-based)
    #[arg(long, value_name = "N")]
    pub open_map: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Clock style accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockArg {
    /// 12-hour clock ("6:00pm")
    #[value(name = "12h")]
    H12,
    /// 24-hour clock ("18:00")
    #[value(name = "24h")]
    H24,
}

impl From<ClockArg> for TimeFormat {
    fn from(arg: ClockArg) -> Self {
        match arg {
            ClockArg::H12 => TimeFormat::H12,
            ClockArg::H24 => TimeFormat::H24,
        }
    }
}

impl Cli {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }

    /// Returns whether any action flag is set.
    pub fn has_action(&self) -> bool {
        self.open.is_some() || self.open_map.is_some()
    }

    /// Applies command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(ref id) = self.calendar_id {
            config.calendar.calendar_id = Some(id.clone());
        }
        if let Some(ref key) = self.api_key {
            config.calendar.api_key = Some(key.clone());
        }
        if let Some(timeout) = self.timeout {
            config.calendar.timeout = timeout;
        }
        if let Some(max) = self.max_title_length {
            config.display.max_title_length = Some(max);
        }
        if let Some(ref text) = self.no_events_text {
            config.display.no_events_text = text.clone();
        }
        if let Some(clock) = self.time_format {
            config.display.time_format = clock.into();
        }
        if self.no_hyperlinks {
            config.display.hyperlinks = false;
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
