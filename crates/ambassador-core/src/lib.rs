#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for credential slot changes.
pub const TRACING_TARGET_CREDENTIALS: &str = "ambassador_core::credentials";

mod credentials;
mod dashboard;
mod error;
mod provider;
mod resource;
mod settings;

pub mod filter;
pub mod types;

pub use credentials::{CredentialState, Credentials};
pub use dashboard::{DashboardSummary, StatCard, StatKind};
pub use error::{
    BoxedError, Error, ErrorKind, NETWORK_ERROR_MESSAGE, Result, SERVER_ERROR_MESSAGE,
    UNEXPECTED_ERROR_MESSAGE,
};
pub use provider::{Authenticator, ListSource, SettingsWriter};
pub use resource::{Creatable, MasterData, Resource, Updatable};
pub use settings::{AccountSettings, CustomerSetting, SettingsPatch, ToggleableSetting};
