//! Mock authenticator.

use std::sync::{Arc, Mutex};

use ambassador_core::types::{LoginCredentials, Subject};
use ambassador_core::{Authenticator, Error, Result};

use super::{admin_subject, lock};

#[derive(Debug, Clone)]
enum LoginOutcome {
    Accept(Subject),
    Reject(String),
}

#[derive(Debug)]
struct AuthState {
    outcome: LoginOutcome,
    fail_logout: bool,
    logins: Vec<String>,
    logouts: usize,
}

/// Authenticator returning a configured outcome.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    state: Arc<Mutex<AuthState>>,
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAuthenticator {
    /// Accepts every login as administrator `1`.
    pub fn new() -> Self {
        Self::accepting(admin_subject(1))
    }

    /// Accepts every login as `subject`.
    pub fn accepting(subject: Subject) -> Self {
        Self::with_outcome(LoginOutcome::Accept(subject))
    }

    /// Rejects every login with an authentication error carrying `message`.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self::with_outcome(LoginOutcome::Reject(message.into()))
    }

    fn with_outcome(outcome: LoginOutcome) -> Self {
        Self {
            state: Arc::new(Mutex::new(AuthState {
                outcome,
                fail_logout: false,
                logins: Vec::new(),
                logouts: 0,
            })),
        }
    }

    /// Makes every logout fail with a network error.
    #[must_use]
    pub fn with_logout_failure(self) -> Self {
        lock(&self.state).fail_logout = true;
        self
    }

    /// Number of login attempts received.
    pub fn login_calls(&self) -> usize {
        lock(&self.state).logins.len()
    }

    /// Identifiers of every login attempt, in order.
    pub fn login_identifiers(&self) -> Vec<String> {
        lock(&self.state).logins.clone()
    }

    /// Number of logout calls received.
    pub fn logout_calls(&self) -> usize {
        lock(&self.state).logouts
    }
}

#[async_trait::async_trait]
impl Authenticator for MockAuthenticator {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Subject> {
        let outcome = {
            let mut state = lock(&self.state);
            state.logins.push(credentials.identifier.clone());
            state.outcome.clone()
        };

        tokio::task::yield_now().await;

        match outcome {
            LoginOutcome::Accept(subject) => Ok(subject),
            LoginOutcome::Reject(message) => Err(Error::authentication().with_message(message)),
        }
    }

    async fn logout(&self) -> Result<()> {
        let fail = {
            let mut state = lock(&self.state);
            state.logouts += 1;
            state.fail_logout
        };

        if fail {
            return Err(Error::network_error());
        }
        Ok(())
    }
}
