//! Composition root: the store, the API client and the auth controller.

use std::sync::Arc;

use ambassador_core::Credentials;
use ambassador_core::types::Subject;
use ambassador_reqwest::ApiClient;
use ambassador_session::store::{FileStore, SharedStore};
use ambassador_session::{AuthController, Preferences, SessionManager};
use anyhow::Context;
use serde::Serialize;

use crate::TRACING_TARGET_APP;
use crate::config::Cli;

/// Long-lived collaborators shared by every command.
#[derive(Debug, Clone)]
pub struct App {
    pub client: ApiClient,
    pub auth: AuthController,
    pub preferences: Preferences,
}

impl App {
    /// Opens the state directory and restores the persisted session.
    pub async fn connect(cli: &Cli) -> anyhow::Result<Self> {
        let store = FileStore::open(cli.store.state_dir.clone())
            .await
            .context("failed to open the state directory")?;
        let store: SharedStore = Arc::new(store);

        let credentials = Credentials::new();
        let client = ApiClient::new(cli.api.clone(), credentials.clone())
            .context("failed to create the API client")?;

        let sessions = SessionManager::new(store.clone()).with_ttl(cli.store.session_ttl());
        let auth = AuthController::new(Arc::new(client.clone()), sessions, credentials);
        auth.initialize()
            .await
            .context("failed to restore the session")?;

        Ok(Self {
            client,
            auth,
            preferences: Preferences::new(store),
        })
    }

    /// Returns the logged-in subject or fails with a hint to log in.
    pub fn require_session(&self) -> anyhow::Result<Subject> {
        match self.auth.state().subject() {
            Some(subject) => Ok(subject.clone()),
            None => anyhow::bail!("not logged in, run `ambassador login` first"),
        }
    }

    /// Finishes a logout the server forced during the last command.
    pub async fn reconcile(&self) -> anyhow::Result<()> {
        let invalidated = self
            .auth
            .reconcile()
            .await
            .context("failed to clear the invalidated session")?;

        if invalidated {
            tracing::warn!(
                target: TRACING_TARGET_APP,
                "The server ended the session, please log in again"
            );
        }
        Ok(())
    }
}

/// Writes `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write output")?;
    std::io::Write::write_all(&mut out, b"\n").context("failed to write output")?;
    Ok(())
}
