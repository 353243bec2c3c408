//! Normalization of transport and server failures.
//!
//! Every failure leaves this crate as an [`ambassador_core::Error`]:
//!
//! - a response with a non-success status keeps that status and the body's
//!   `error` or `message` field,
//! - a request that received no response (connect failure, timeout) has
//!   status `0` and the network message,
//! - a client-side failure (bad URL, encoding, decoding) has status `0` and
//!   the failure's own text.

use ambassador_core::{Error, ErrorKind, SERVER_ERROR_MESSAGE};
use serde::Deserialize;
use thiserror::Error as ThisError;

/// Internal error type for failures raised before or after the exchange.
#[derive(Debug, ThisError)]
pub(crate) enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<ClientError> for Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Reqwest(e) => {
                if e.is_timeout() {
                    Error::timeout().with_source(e)
                } else if e.is_builder() {
                    let message = e.to_string();
                    Error::internal_error().with_message(message).with_source(e)
                } else if e.is_decode() {
                    let message = e.to_string();
                    Error::serialization().with_message(message).with_source(e)
                } else {
                    Error::network_error().with_source(e)
                }
            }
            ClientError::Url(e) => Error::invalid_input()
                .with_message(e.to_string())
                .with_source(e),
            ClientError::Serde(e) => Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

fn text_of(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(text) if !text.is_empty() => Some(text),
        serde_json::Value::Null | serde_json::Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

/// Builds the error for a response with a non-success status.
pub(crate) fn from_response(status: u16, body: &[u8]) -> Error {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = text_of(parsed.error)
        .or_else(|| text_of(parsed.message))
        .unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_owned());

    Error::new(ErrorKind::from_status(status))
        .with_status(status)
        .with_message(message)
}
