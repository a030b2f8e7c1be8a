//! Core types: event times, event records, display formatting, tracing

pub mod event;
pub mod format;
pub mod time;
pub mod tracing;

pub use event::{EventRecord, EventView, LocalBoundary};
pub use format::{
    DEFAULT_NO_EVENTS_TEXT, DateBadge, FormatOptions, FormattedEvent, JsonEvent, JsonOutput,
    OutputFormat, OutputFormatter, TimeFormat, ellipsis, make_hyperlink,
};
pub use time::EventTime;
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
