//! API client module.
//!
//! This module provides the main client interface for HTTP operations.
//! It wraps the `reqwest` crate for the back-office REST API.

mod client;
mod config;

pub(crate) use client::decode_payload;
pub use client::{ApiClient, TRACING_TARGET};
pub use config::{
    ApiConfig, DEFAULT_HOST, DEFAULT_LOGIN_IDENTIFIER_FIELD, DEFAULT_PREFIX, DEFAULT_TIMEOUT,
};
