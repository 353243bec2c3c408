//! Configuration of the client-side state directory.

use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default directory holding persisted client state.
pub const DEFAULT_STATE_DIR: &str = ".ambassador";

/// Default session lifetime in days.
pub const DEFAULT_SESSION_TTL_DAYS: u64 = 7;

/// Where and for how long client state is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct StoreConfig {
    /// Directory holding the persisted session and preferences
    #[cfg_attr(
        feature = "config",
        arg(long = "state-dir", env = "AMBASSADOR_STATE_DIR", default_value = DEFAULT_STATE_DIR)
    )]
    pub state_dir: PathBuf,

    /// Session lifetime in days
    #[cfg_attr(
        feature = "config",
        arg(long = "session-ttl-days", env = "AMBASSADOR_SESSION_TTL_DAYS", default_value = "7")
    )]
    pub session_ttl_days: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
        }
    }
}

impl StoreConfig {
    /// Set the state directory.
    #[must_use]
    pub fn with_state_dir(mut self, state_dir: impl Into<PathBuf>) -> Self {
        self.state_dir = state_dir.into();
        self
    }

    /// Returns the session lifetime, using the default if zero.
    pub fn session_ttl(&self) -> Duration {
        let days = match self.session_ttl_days {
            0 => DEFAULT_SESSION_TTL_DAYS,
            days => days,
        };
        Duration::from_secs(days.saturating_mul(24 * 60 * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl() {
        let config = StoreConfig::default();
        assert_eq!(config.session_ttl(), crate::session::DEFAULT_SESSION_TTL);

        let config = StoreConfig {
            session_ttl_days: 1,
            ..config
        };
        assert_eq!(config.session_ttl(), Duration::from_secs(86_400));
    }
}
