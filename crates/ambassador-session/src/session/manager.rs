//! Session record lifecycle: load, create, clear.

use std::time::Duration;

use ambassador_core::types::Subject;
use ambassador_core::{Error, ErrorKind, Result};
use jiff::Timestamp;

use super::{DEFAULT_SESSION_TTL, SessionRecord};
use crate::TRACING_TARGET_SESSION;
use crate::store::{JsonStore, SharedStore};

/// Store key of the session record.
pub const SESSION_KEY: &str = "user";

/// Reads and writes the single persisted [`SessionRecord`].
///
/// Expired records are never returned; they are removed on the first read
/// after expiry.
#[derive(Clone)]
pub struct SessionManager {
    store: JsonStore<SessionRecord>,
    ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("key", &self.store.key())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    /// Creates a manager with the default seven day window.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store: JsonStore::new(store, SESSION_KEY),
            ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Overrides the session window.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the session window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Loads the current session, if one exists and has not expired.
    pub async fn load_session(&self) -> Result<Option<SessionRecord>> {
        self.load_session_at(Timestamp::now()).await
    }

    /// Loads the session as seen at `now`.
    ///
    /// Expired and undecodable records are removed and read as absent.
    pub async fn load_session_at(&self, now: Timestamp) -> Result<Option<SessionRecord>> {
        let record = match self.store.get().await {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(error) if error.kind == ErrorKind::Serialization => {
                tracing::warn!(
                    target: TRACING_TARGET_SESSION,
                    error = %error,
                    "Discarding unreadable session record"
                );
                self.store.remove().await?;
                return Ok(None);
            }
            Err(error) => return Err(error),
        };

        if !record.is_valid_at(now) {
            tracing::info!(
                target: TRACING_TARGET_SESSION,
                expiry_timestamp = record.expiry_timestamp,
                "Session expired, removing"
            );
            self.store.remove().await?;
            return Ok(None);
        }

        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            expiry_timestamp = record.expiry_timestamp,
            "Restored session"
        );
        Ok(Some(record))
    }

    /// Persists a new session for `subject`.
    pub async fn create_session(&self, subject: Subject) -> Result<SessionRecord> {
        self.create_session_at(subject, Timestamp::now()).await
    }

    /// Persists a new session for `subject`, expiring one window after `now`.
    ///
    /// A subject without an identifier is rejected and nothing is written.
    pub async fn create_session_at(&self, subject: Subject, now: Timestamp) -> Result<SessionRecord> {
        if !subject.has_identity() {
            return Err(Error::invalid_input().with_message("Invalid user data"));
        }

        let record = SessionRecord::new(subject, now, self.ttl);
        self.store.set(&record).await?;

        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            expiry_timestamp = record.expiry_timestamp,
            "Created session"
        );
        Ok(record)
    }

    /// Removes the session. Idempotent.
    pub async fn clear_session(&self) -> Result<()> {
        self.store.remove().await?;
        tracing::debug!(target: TRACING_TARGET_SESSION, "Cleared session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ambassador_core::types::EntityId;

    use super::*;
    use crate::store::{FileStore, MemoryStore, StoreBackend};

    fn subject(id: i64) -> Subject {
        Subject {
            id: Some(EntityId::from(id)),
            admin_name: Some("root".into()),
            token: Some("jwt".into()),
            ..Default::default()
        }
    }

    fn manager() -> (MemoryStore, SessionManager) {
        let backend = MemoryStore::new();
        let manager = SessionManager::new(Arc::new(backend.clone()));
        (backend, manager)
    }

    #[tokio::test]
    async fn test_create_then_load_round_trips() {
        let (_, manager) = manager();
        let created = manager.create_session(subject(1)).await.unwrap();
        let loaded = manager.load_session().await.unwrap();
        assert_eq!(loaded, Some(created));
    }

    #[tokio::test]
    async fn test_expiry_is_seven_days() {
        let (_, manager) = manager();
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        let record = manager.create_session_at(subject(1), now).await.unwrap();
        assert_eq!(
            record.expiry_timestamp - now.as_millisecond(),
            7 * 24 * 60 * 60 * 1000
        );
    }

    #[tokio::test]
    async fn test_expired_session_is_removed() {
        let (backend, manager) = manager();
        let created_at = Timestamp::from_second(1_700_000_000).unwrap();
        manager.create_session_at(subject(1), created_at).await.unwrap();

        let later = created_at
            .checked_add(jiff::SignedDuration::from_hours(7 * 24 + 1))
            .unwrap();
        assert_eq!(manager.load_session_at(later).await.unwrap(), None);
        assert_eq!(backend.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_subject_without_id_is_not_persisted() {
        let (backend, manager) = manager();
        let error = manager
            .create_session(Subject::default())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_as_absent() {
        let (backend, manager) = manager();
        backend.set(SESSION_KEY, "{\"subject\":").await.unwrap();

        assert_eq!(manager.load_session().await.unwrap(), None);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_backend_fields_are_persisted() {
        let (backend, manager) = manager();
        let mut subject = subject(7);
        subject.extra.insert("role".into(), serde_json::json!("super"));
        subject.extra.insert("email".into(), serde_json::json!("root@example.com"));

        manager.create_session(subject.clone()).await.unwrap();
        let raw = backend.get(SESSION_KEY).await.unwrap().unwrap();
        assert!(raw.contains("\"role\":\"super\""));

        let loaded = manager.load_session().await.unwrap().unwrap();
        assert_eq!(loaded.subject, subject);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let (backend, manager) = manager();
        manager.create_session(subject(1)).await.unwrap();
        manager.clear_session().await.unwrap();
        manager.clear_session().await.unwrap();
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let created = SessionManager::new(Arc::new(store))
            .create_session(subject(3))
            .await
            .unwrap();

        let reopened = FileStore::open(dir.path()).await.unwrap();
        let loaded = SessionManager::new(Arc::new(reopened))
            .load_session()
            .await
            .unwrap();
        assert_eq!(loaded, Some(created));
    }

    #[tokio::test]
    async fn test_custom_ttl() {
        let (_, manager) = manager();
        let manager = manager.with_ttl(Duration::from_secs(60));
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        let record = manager.create_session_at(subject(1), now).await.unwrap();
        assert_eq!(record.expiry_timestamp - now.as_millisecond(), 60_000);
    }
}
