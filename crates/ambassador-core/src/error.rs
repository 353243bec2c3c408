//! Structured error handling for back-office operations.
//!
//! Every failure, whether it comes from the server, the network, local
//! validation or the persistent store, is expressed as one [`Error`] exposing
//! a renderable [`Error::message`] and an HTTP [`Error::status`] (`0` when no
//! response was received).

use hipstr::HipStr;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Message used when no response was received from the server.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Message used when the server rejected a request without saying why.
pub const SERVER_ERROR_MESSAGE: &str = "An error occurred";

/// Message used for client-side failures without a description.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Categories of errors that can occur in back-office operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed before reaching the network.
    InvalidInput,
    /// No response was received.
    NetworkError,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The server rejected the credentials (`401`).
    Authentication,
    /// The server refused the operation (`403`).
    Authorization,
    /// Resource not found (`404`).
    NotFound,
    /// Rate limit exceeded (`429`).
    RateLimited,
    /// Service temporarily unavailable (`502`, `503`, `504`).
    ServiceUnavailable,
    /// Any other non-success response.
    ExternalError,
    /// Serialization/deserialization error.
    Serialization,
    /// The persistent store failed.
    Storage,
    /// Configuration error.
    Configuration,
    /// Internal error.
    InternalError,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Classifies a non-success HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidInput,
            401 => Self::Authentication,
            403 => Self::Authorization,
            404 => Self::NotFound,
            408 => Self::Timeout,
            429 => Self::RateLimited,
            502..=504 => Self::ServiceUnavailable,
            _ => Self::ExternalError,
        }
    }

    /// Check if this error kind is typically retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::ServiceUnavailable | Self::RateLimited
        )
    }

    /// Returns the message shown when the error carries none.
    #[must_use]
    pub const fn fallback_message(&self) -> &'static str {
        match self {
            Self::NetworkError | Self::Timeout => NETWORK_ERROR_MESSAGE,
            Self::Authentication
            | Self::Authorization
            | Self::NotFound
            | Self::RateLimited
            | Self::ServiceUnavailable
            | Self::ExternalError => SERVER_ERROR_MESSAGE,
            _ => UNEXPECTED_ERROR_MESSAGE,
        }
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<HipStr<'static>>,
    /// HTTP status of the response this error was derived from.
    pub status: Option<u16>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information.
    pub context: Option<HipStr<'static>>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Creates an error for a non-success response.
    pub fn from_status(status: u16) -> Self {
        Self::new(ErrorKind::from_status(status)).with_status(status)
    }

    /// Input validation failed.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// No response was received.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// The request timed out.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Authentication failed.
    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    /// Encoding or decoding failed.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// The persistent store failed.
    pub fn storage() -> Self {
        Self::new(ErrorKind::Storage)
    }

    /// Configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Internal error.
    pub fn internal_error() -> Self {
        Self::new(ErrorKind::InternalError)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<HipStr<'static>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Records the HTTP status of the failed response.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<HipStr<'static>>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns the message to show to a user.
    ///
    /// Falls back to a generic text for the error kind when no message was set.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.kind.fallback_message())
    }

    /// Returns the HTTP status, `0` when no response was received.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(0)
    }

    /// Returns `true` when the server reported the session as invalid.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Check if this error is retryable based on its kind.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::from_source(ErrorKind::Storage, error).with_message("I/O operation failed")
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        let message = error.to_string();
        Self::from_source(ErrorKind::Serialization, error).with_message(message)
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors.to_string();
        Self::from_source(ErrorKind::InvalidInput, errors).with_message(message)
    }
}
