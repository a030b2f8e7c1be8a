//! Error types for fetching upcoming events.
//!
//! Every failure of a fetch is surfaced as a [`FetchError`] whose
//! [`FetchErrorKind`] tells the caller what went wrong:
//!
//! - [`FetchErrorKind::Transport`]: the exchange with the calendar service
//!   could not be completed
//! - [`FetchErrorKind::RemoteRejected`]: the service answered with a
//!   non-success status
//! - [`FetchErrorKind::MalformedResponse`]: the service answered with a
//!   success status but the body is not the expected structure

use std::fmt;
use thiserror::Error;

/// The category of a fetch error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Unreachable host, timeout, connection reset, truncated body.
    Transport,
    /// The service was reached but declined the request.
    RemoteRejected {
        /// The HTTP status code returned by the service.
        status: u16,
    },
    /// The body could not be interpreted as an event listing.
    MalformedResponse,
}

impl FetchErrorKind {
    /// Returns true if repeating the same request may succeed.
    ///
    /// Transport failures, rate limiting (429) and server errors (5xx) are
    /// transient; bad credentials, unknown calendars and malformed bodies
    /// are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport => true,
            Self::RemoteRejected { status } => *status == 429 || (500..600).contains(status),
            Self::MalformedResponse => false,
        }
    }

    /// Returns a stable machine-readable name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::RemoteRejected { .. } => "remote_rejected",
            Self::MalformedResponse => "malformed_response",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteRejected { status } => write!(f, "{} (HTTP {})", self.as_str(), status),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

/// An error that occurred while fetching upcoming events.
#[derive(Debug, Error)]
pub struct FetchError {
    /// The kind of failure.
    kind: FetchErrorKind,
    /// A human-readable message describing the error.
    message: String,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FetchError {
    /// Creates a new fetch error with the given kind and message.
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Transport, message)
    }

    /// Creates a rejection error carrying the remote status code.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::RemoteRejected { status }, message)
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::MalformedResponse, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the remote status code for rejections.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FetchErrorKind::RemoteRejected { status } => Some(status),
            _ => None,
        }
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A specialized Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
