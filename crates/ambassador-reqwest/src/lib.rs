//! Reqwest-based HTTP client for the ambassador back-office API.
//!
//! This crate provides the [`ApiClient`], which implements the
//! `Authenticator`, `SettingsWriter` and `ListSource` traits of
//! `ambassador-core`.
//!
//! # Example
//!
//! ```rust,ignore
//! use ambassador_core::Credentials;
//! use ambassador_core::filter::WithdrawalFilter;
//! use ambassador_core::types::{Withdrawal, WithdrawalStatus};
//! use ambassador_reqwest::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(ApiConfig::default(), Credentials::new())?;
//!
//! let filter = WithdrawalFilter::default().with_status(WithdrawalStatus::Pending);
//! for withdrawal in client.list::<Withdrawal>(&filter).await? {
//!     client.approve_withdrawal(&withdrawal.id).await?;
//! }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod connect;
mod error;
mod service;

pub use crate::connect::{
    ApiClient, ApiConfig, DEFAULT_HOST, DEFAULT_LOGIN_IDENTIFIER_FIELD, DEFAULT_PREFIX,
    DEFAULT_TIMEOUT, TRACING_TARGET,
};
