//! Configuration for the back-office API client.

use std::time::Duration;

use ambassador_core::{Error, Result};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default API host.
pub const DEFAULT_HOST: &str = "http://localhost:4000";

/// Default API path prefix.
pub const DEFAULT_PREFIX: &str = "/api";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default JSON field carrying the login identifier.
pub const DEFAULT_LOGIN_IDENTIFIER_FIELD: &str = "adminName";

/// Configuration for the back-office API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ApiConfig {
    /// Scheme, host and port of the back-office API
    #[cfg_attr(
        feature = "config",
        arg(long = "api-host", env = "API_HOST", default_value = DEFAULT_HOST)
    )]
    pub api_host: String,

    /// Path prefix prepended to every resource path
    #[cfg_attr(
        feature = "config",
        arg(long = "api-prefix", env = "API_PREFIX", default_value = DEFAULT_PREFIX)
    )]
    pub api_prefix: String,

    /// Request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "api-timeout-secs", env = "API_TIMEOUT_SECS", default_value = "30")
    )]
    pub api_timeout_secs: u64,

    /// User-Agent header sent with every request (optional)
    #[cfg_attr(
        feature = "config",
        arg(long = "api-user-agent", env = "API_USER_AGENT")
    )]
    pub api_user_agent: Option<String>,

    /// JSON field name of the login identifier
    #[cfg_attr(
        feature = "config",
        arg(
            long = "api-login-identifier-field",
            env = "API_LOGIN_IDENTIFIER_FIELD",
            default_value = DEFAULT_LOGIN_IDENTIFIER_FIELD
        )
    )]
    pub login_identifier_field: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_HOST.to_owned(),
            api_prefix: DEFAULT_PREFIX.to_owned(),
            api_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            api_user_agent: None,
            login_identifier_field: DEFAULT_LOGIN_IDENTIFIER_FIELD.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Creates a configuration for the given host with default settings.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            api_host: host.into(),
            ..Self::default()
        }
    }

    /// Set the API host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Set the path prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.api_timeout_secs = secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.api_user_agent = Some(user_agent.into());
        self
    }

    /// Set the JSON field name of the login identifier.
    #[must_use]
    pub fn with_login_identifier_field(mut self, field: impl Into<String>) -> Self {
        self.login_identifier_field = field.into();
        self
    }

    /// Returns the host without a trailing slash.
    pub fn host(&self) -> &str {
        self.api_host.trim_end_matches('/')
    }

    /// Returns `host + prefix`, the base of every resource path.
    pub fn base_url(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            self.host().to_owned()
        } else {
            format!("{}/{}", self.host(), prefix)
        }
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.api_timeout_secs == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(self.api_timeout_secs)
        }
    }

    /// Returns the effective user agent, using default if empty.
    pub fn effective_user_agent(&self) -> String {
        match self.api_user_agent.as_deref() {
            Some(user_agent) if !user_agent.is_empty() => user_agent.to_owned(),
            _ => format!("ambassador/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url()).map_err(|e| {
            Error::configuration()
                .with_message(format!("invalid API host: {e}"))
                .with_source(e)
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration()
                .with_message(format!("unsupported API scheme: {}", url.scheme())));
        }

        if self.login_identifier_field.trim().is_empty() {
            return Err(
                Error::configuration().with_message("login identifier field cannot be empty")
            );
        }

        Ok(())
    }
}
