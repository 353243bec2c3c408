//! `login`, `logout` and `status`.

use ambassador_core::types::LoginCredentials;
use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::app::{App, print_json};

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// Administrator name
    pub identifier: String,

    /// Administrator password
    #[arg(long, env = "AMBASSADOR_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn login(app: &App, args: &LoginArgs) -> anyhow::Result<()> {
    let credentials = LoginCredentials::new(&args.identifier, &args.password);
    let subject = app.auth.login(&credentials).await.context("login failed")?;

    print_json(&json!({
        "authenticated": true,
        "subject": subject.display_name(),
        "id": subject.id,
    }))
}

pub async fn logout(app: &App) -> anyhow::Result<()> {
    app.auth
        .logout()
        .await
        .context("remote logout failed; the local session was cleared")?;

    print_json(&json!({ "authenticated": false }))
}

pub fn status(app: &App) -> anyhow::Result<()> {
    let state = app.auth.state();
    let subject = state.subject();

    print_json(&json!({
        "authenticated": state.is_authenticated(),
        "subject": subject.and_then(|s| s.display_name()),
        "id": subject.and_then(|s| s.id.clone()),
        "baseUrl": app.client.base_url(),
    }))
}
