//! Login, logout and session restoration.

use std::fmt;
use std::sync::Arc;

use ambassador_core::types::{LoginCredentials, Subject};
use ambassador_core::{Authenticator, CredentialState, Credentials, Result};
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_AUTH;
use crate::session::{SESSION_KEY, SessionManager};

/// Authentication state observed by the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// The persisted session has not been read yet.
    #[default]
    Initializing,
    /// A valid session is active.
    Authenticated(Subject),
    /// No session is active.
    Anonymous,
}

impl AuthState {
    /// Returns the authenticated subject, if any.
    pub fn subject(&self) -> Option<&Subject> {
        match self {
            Self::Authenticated(subject) => Some(subject),
            _ => None,
        }
    }

    /// Returns `true` while a session is active.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

struct AuthInner {
    authenticator: Arc<dyn Authenticator>,
    sessions: SessionManager,
    credentials: Credentials,
    state: watch::Sender<AuthState>,
    op_lock: Mutex<()>,
}

/// Owns the session record and the shared bearer credential.
///
/// Login, logout and revocation handling are serialized; concurrent calls
/// run one after another.
#[derive(Clone)]
pub struct AuthController {
    inner: Arc<AuthInner>,
}

impl fmt::Debug for AuthController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthController")
            .field("state", &*self.inner.state.borrow())
            .field("credentials", &self.inner.credentials)
            .finish_non_exhaustive()
    }
}

impl AuthController {
    /// Creates a controller in the [`AuthState::Initializing`] state.
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        sessions: SessionManager,
        credentials: Credentials,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::Initializing);
        Self {
            inner: Arc::new(AuthInner {
                authenticator,
                sessions,
                credentials,
                state,
                op_lock: Mutex::new(()),
            }),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// Returns the shared credential slot.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Restores the persisted session, if any.
    ///
    /// A storage failure leaves the controller anonymous and is returned.
    pub async fn initialize(&self) -> Result<AuthState> {
        let _guard = self.inner.op_lock.lock().await;

        let record = match self.inner.sessions.load_session().await {
            Ok(record) => record,
            Err(error) => {
                self.inner.credentials.detach();
                self.inner.state.send_replace(AuthState::Anonymous);
                return Err(error);
            }
        };

        let state = match record {
            Some(record) => {
                self.inner
                    .credentials
                    .attach(record.subject.token.as_deref());
                tracing::info!(
                    target: TRACING_TARGET_AUTH,
                    subject = record.subject.display_name(),
                    "Session restored"
                );
                AuthState::Authenticated(record.subject)
            }
            None => {
                self.inner.credentials.detach();
                AuthState::Anonymous
            }
        };

        self.inner.state.send_replace(state.clone());
        Ok(state)
    }

    /// Authenticates and starts a new session.
    ///
    /// On failure the previous state is kept (an uninitialized controller
    /// becomes anonymous) and the error is returned.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Subject> {
        let _guard = self.inner.op_lock.lock().await;

        let result = self.login_inner(credentials).await;
        match &result {
            Ok(subject) => {
                tracing::info!(
                    target: TRACING_TARGET_AUTH,
                    subject = subject.display_name(),
                    "Login succeeded"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_AUTH,
                    identifier = %credentials.identifier,
                    error = %error,
                    "Login failed"
                );
                self.inner.state.send_if_modified(|state| {
                    let initializing = *state == AuthState::Initializing;
                    if initializing {
                        *state = AuthState::Anonymous;
                    }
                    initializing
                });
            }
        }

        result
    }

    async fn login_inner(&self, credentials: &LoginCredentials) -> Result<Subject> {
        let subject = self.inner.authenticator.login(credentials).await?;
        let record = self.inner.sessions.create_session(subject).await?;

        self.inner
            .credentials
            .attach(record.subject.token.as_deref());
        self.inner
            .state
            .send_replace(AuthState::Authenticated(record.subject.clone()));

        Ok(record.subject)
    }

    /// Ends the session.
    ///
    /// The remote logout is best effort: the local session and the
    /// credential are cleared whatever it returns. The remote error, if
    /// any, is returned after the local transition.
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.inner.op_lock.lock().await;

        let remote = self.inner.authenticator.logout().await;
        if let Err(error) = &remote {
            tracing::warn!(
                target: TRACING_TARGET_AUTH,
                error = %error,
                "Remote logout failed, clearing local session anyway"
            );
        }

        let local = self.end_session().await;
        tracing::info!(target: TRACING_TARGET_AUTH, "Logged out");

        remote.and(local)
    }

    /// Completes the logout after the server revoked the credential.
    ///
    /// Returns `true` if this call performed the transition. Calling it
    /// again, or without a revocation, does nothing.
    pub async fn reconcile(&self) -> Result<bool> {
        if self.inner.credentials.state() != CredentialState::Revoked {
            return Ok(false);
        }

        let _guard = self.inner.op_lock.lock().await;
        if self.inner.credentials.state() != CredentialState::Revoked {
            return Ok(false);
        }

        let was_authenticated = self.inner.state.borrow().is_authenticated();
        self.end_session().await?;

        if was_authenticated {
            tracing::warn!(
                target: TRACING_TARGET_AUTH,
                "Session invalidated by the server"
            );
        }

        Ok(was_authenticated)
    }

    /// Reconciles every revocation until `cancel` fires.
    pub async fn watch_revocations(&self, cancel: CancellationToken) {
        let mut receiver = self.inner.credentials.subscribe();
        receiver.mark_changed();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = receiver.changed() => {
                    if changed.is_err() {
                        break;
                    }

                    let revoked = *receiver.borrow_and_update() == CredentialState::Revoked;
                    if revoked && let Err(error) = self.reconcile().await {
                        tracing::error!(
                            target: TRACING_TARGET_AUTH,
                            error = %error,
                            "Failed to clear the invalidated session"
                        );
                    }
                }
            }
        }

        tracing::debug!(target: TRACING_TARGET_AUTH, "Revocation watcher stopped");
    }

    /// Drops the credential and removes the persisted record.
    ///
    /// The removal is retried once; a record that survives both attempts
    /// would restore the session on the next start.
    async fn end_session(&self) -> Result<()> {
        self.inner.credentials.detach();
        self.inner.state.send_replace(AuthState::Anonymous);

        let Err(error) = self.inner.sessions.clear_session().await else {
            return Ok(());
        };
        tracing::warn!(
            target: TRACING_TARGET_AUTH,
            key = SESSION_KEY,
            error = %error,
            "Failed to remove the session record, retrying"
        );

        if let Err(error) = self.inner.sessions.clear_session().await {
            tracing::error!(
                target: TRACING_TARGET_AUTH,
                key = SESSION_KEY,
                error = %error,
                "Session record left in place, it will be restored on the next start"
            );
            return Err(error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ambassador_core::ErrorKind;
    use ambassador_core::types::EntityId;
    use ambassador_test::{MockAuthenticator, admin_subject};

    use std::sync::atomic::{AtomicUsize, Ordering};

    use ambassador_core::Error;

    use super::*;
    use crate::store::{MemoryStore, StoreBackend};

    /// Memory store whose next `remove` calls fail.
    #[derive(Clone, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing_removes: Arc<AtomicUsize>,
    }

    impl FlakyStore {
        fn is_empty(&self) -> bool {
            self.inner.is_empty()
        }
    }

    #[async_trait::async_trait]
    impl StoreBackend for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<()> {
            let failing = self
                .failing_removes
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return Err(Error::storage().with_message("disk unavailable"));
            }
            self.inner.remove(key).await
        }
    }

    struct Harness {
        backend: FlakyStore,
        authenticator: MockAuthenticator,
        controller: AuthController,
    }

    fn harness(authenticator: MockAuthenticator) -> Harness {
        let backend = FlakyStore::default();
        let sessions = SessionManager::new(Arc::new(backend.clone()));
        let controller = AuthController::new(
            Arc::new(authenticator.clone()),
            sessions,
            Credentials::new(),
        );

        Harness {
            backend,
            authenticator,
            controller,
        }
    }

    fn credentials() -> LoginCredentials {
        LoginCredentials::new("root", "secret")
    }

    #[tokio::test]
    async fn test_initialize_without_session() {
        let h = harness(MockAuthenticator::new());
        assert_eq!(h.controller.state(), AuthState::Initializing);

        let state = h.controller.initialize().await.unwrap();
        assert_eq!(state, AuthState::Anonymous);
        assert_eq!(h.controller.credentials().state(), CredentialState::Absent);
    }

    #[tokio::test]
    async fn test_login_persists_and_attaches() {
        let h = harness(MockAuthenticator::accepting(admin_subject(7)));
        h.controller.initialize().await.unwrap();

        let subject = h.controller.login(&credentials()).await.unwrap();
        assert_eq!(subject.id, Some(EntityId::from(7)));
        assert!(h.controller.state().is_authenticated());
        assert!(h.controller.credentials().bearer().is_some());
        assert!(h.backend.get(SESSION_KEY).await.unwrap().is_some());
        assert_eq!(h.authenticator.login_calls(), 1);
    }

    #[tokio::test]
    async fn test_initialize_restores_session() {
        let h = harness(MockAuthenticator::accepting(admin_subject(7)));
        h.controller.login(&credentials()).await.unwrap();

        let restored = AuthController::new(
            Arc::new(h.authenticator.clone()),
            SessionManager::new(Arc::new(h.backend.clone())),
            Credentials::new(),
        );
        let state = restored.initialize().await.unwrap();

        assert_eq!(state.subject().and_then(|s| s.id.clone()), Some(EntityId::from(7)));
        assert_eq!(
            restored.credentials().bearer(),
            admin_subject(7).token
        );
    }

    #[tokio::test]
    async fn test_rejected_login_stays_anonymous() {
        let h = harness(MockAuthenticator::rejecting("Invalid credentials"));
        h.controller.initialize().await.unwrap();

        let error = h.controller.login(&credentials()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Authentication);
        assert_eq!(error.message(), "Invalid credentials");
        assert_eq!(h.controller.state(), AuthState::Anonymous);
        assert!(h.backend.is_empty());
    }

    #[tokio::test]
    async fn test_subject_without_id_is_rejected() {
        let h = harness(MockAuthenticator::accepting(Default::default()));

        let error = h.controller.login(&credentials()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(h.controller.state(), AuthState::Anonymous);
        assert_eq!(h.controller.credentials().state(), CredentialState::Absent);
        assert!(h.backend.is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_remote_fails() {
        let h = harness(MockAuthenticator::accepting(admin_subject(1)).with_logout_failure());
        h.controller.login(&credentials()).await.unwrap();

        let result = h.controller.logout().await;
        assert!(result.is_err());
        assert_eq!(h.controller.state(), AuthState::Anonymous);
        assert_eq!(h.controller.credentials().state(), CredentialState::Absent);
        assert!(h.backend.is_empty());
        assert_eq!(h.authenticator.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_logout_retries_record_removal() {
        let h = harness(MockAuthenticator::accepting(admin_subject(1)));
        h.controller.login(&credentials()).await.unwrap();

        h.backend.failing_removes.store(1, Ordering::SeqCst);
        h.controller.logout().await.unwrap();
        assert!(h.backend.is_empty());
    }

    #[tokio::test]
    async fn test_logout_reports_lingering_record() {
        let h = harness(MockAuthenticator::accepting(admin_subject(1)));
        h.controller.login(&credentials()).await.unwrap();

        h.backend.failing_removes.store(2, Ordering::SeqCst);
        let error = h.controller.logout().await.unwrap_err();
        assert_eq!(error.message(), "disk unavailable");
        assert_eq!(h.controller.state(), AuthState::Anonymous);
        assert_eq!(h.controller.credentials().state(), CredentialState::Absent);
        assert!(!h.backend.is_empty());
    }

    #[tokio::test]
    async fn test_logout_success() {
        let h = harness(MockAuthenticator::accepting(admin_subject(1)));
        h.controller.login(&credentials()).await.unwrap();

        h.controller.logout().await.unwrap();
        assert_eq!(h.controller.state(), AuthState::Anonymous);
        assert!(h.backend.is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_runs_once() {
        let h = harness(MockAuthenticator::accepting(admin_subject(1)));
        h.controller.login(&credentials()).await.unwrap();

        assert!(!h.controller.reconcile().await.unwrap());

        h.controller.credentials().revoke();
        assert!(h.controller.reconcile().await.unwrap());
        assert!(!h.controller.reconcile().await.unwrap());

        assert_eq!(h.controller.state(), AuthState::Anonymous);
        assert_eq!(h.controller.credentials().state(), CredentialState::Absent);
        assert!(h.backend.is_empty());
    }

    #[tokio::test]
    async fn test_watcher_reconciles_revocation() {
        let h = harness(MockAuthenticator::accepting(admin_subject(1)));
        h.controller.login(&credentials()).await.unwrap();

        let cancel = CancellationToken::new();
        let watcher = {
            let controller = h.controller.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { controller.watch_revocations(cancel).await })
        };

        let mut states = h.controller.subscribe();
        h.controller.credentials().revoke();
        tokio::time::timeout(
            Duration::from_secs(5),
            states.wait_for(|state| *state == AuthState::Anonymous),
        )
        .await
        .unwrap()
        .unwrap();

        cancel.cancel();
        watcher.await.unwrap();
        assert!(h.backend.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_logins_are_serialized() {
        let h = harness(MockAuthenticator::accepting(admin_subject(1)));
        let (first, second) = (credentials(), credentials());
        let (a, b) = tokio::join!(h.controller.login(&first), h.controller.login(&second));

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(h.authenticator.login_calls(), 2);
        assert!(h.controller.state().is_authenticated());
    }
}
