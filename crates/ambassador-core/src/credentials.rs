//! Shared bearer credential slot.
//!
//! The HTTP client reads the slot on every request; the auth session
//! controller writes it on login and logout. A `401` response revokes the
//! credential and publishes [`CredentialState::Revoked`] so that the session
//! owner can finish the logout transition.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use hipstr::HipStr;
use tokio::sync::watch;

use crate::TRACING_TARGET_CREDENTIALS;

/// Observable state of the credential slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialState {
    /// No credential has been attached.
    #[default]
    Absent,
    /// A session is active (with or without a bearer token).
    Attached,
    /// The server invalidated the session; the credential was dropped.
    Revoked,
}

struct CredentialsInner {
    token: RwLock<Option<HipStr<'static>>>,
    state: watch::Sender<CredentialState>,
}

/// Cloneable handle to the bearer credential attached to outbound requests.
#[derive(Clone)]
pub struct Credentials {
    inner: Arc<CredentialsInner>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new()
    }
}

impl Credentials {
    /// Creates an empty credential slot.
    pub fn new() -> Self {
        let (state, _) = watch::channel(CredentialState::Absent);
        Self {
            inner: Arc::new(CredentialsInner {
                token: RwLock::new(None),
                state,
            }),
        }
    }

    /// Marks a session as active, attaching the bearer token when there is one.
    pub fn attach(&self, token: Option<&str>) {
        *self.write_token() = token.map(|t| HipStr::from(t.to_owned()));
        self.inner.state.send_replace(CredentialState::Attached);

        tracing::debug!(
            target: TRACING_TARGET_CREDENTIALS,
            has_token = token.is_some(),
            "Credential attached"
        );
    }

    /// Drops the credential after an intentional logout.
    pub fn detach(&self) {
        *self.write_token() = None;
        self.inner.state.send_replace(CredentialState::Absent);

        tracing::debug!(target: TRACING_TARGET_CREDENTIALS, "Credential detached");
    }

    /// Drops the credential because the server reported it invalid.
    ///
    /// Returns `true` if this call changed the state.
    pub fn revoke(&self) -> bool {
        *self.write_token() = None;
        let changed = self.inner.state.send_if_modified(|state| {
            let changed = *state != CredentialState::Revoked;
            *state = CredentialState::Revoked;
            changed
        });

        if changed {
            tracing::warn!(
                target: TRACING_TARGET_CREDENTIALS,
                "Credential revoked by the server"
            );
        }

        changed
    }

    /// Returns the bearer token to attach to the next request.
    pub fn bearer(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|t| t.as_str().to_owned())
    }

    /// Returns the current state.
    pub fn state(&self) -> CredentialState {
        *self.inner.state.borrow()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<CredentialState> {
        self.inner.state.subscribe()
    }

    fn write_token(&self) -> std::sync::RwLockWriteGuard<'_, Option<HipStr<'static>>> {
        self.inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_and_detach() {
        let credentials = Credentials::new();
        assert_eq!(credentials.state(), CredentialState::Absent);
        assert!(credentials.bearer().is_none());

        credentials.attach(Some("secret"));
        assert_eq!(credentials.state(), CredentialState::Attached);
        assert_eq!(credentials.bearer().as_deref(), Some("secret"));

        credentials.detach();
        assert_eq!(credentials.state(), CredentialState::Absent);
        assert!(credentials.bearer().is_none());
    }

    #[test]
    fn test_revoke_is_reported_once() {
        let credentials = Credentials::new();
        credentials.attach(Some("secret"));

        assert!(credentials.revoke());
        assert!(!credentials.revoke());
        assert_eq!(credentials.state(), CredentialState::Revoked);
        assert!(credentials.bearer().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let credentials = Credentials::new();
        let clone = credentials.clone();
        let mut receiver = credentials.subscribe();

        clone.attach(None);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), CredentialState::Attached);
        assert!(credentials.bearer().is_none());
    }
}
