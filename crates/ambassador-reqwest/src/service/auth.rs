//! Login and logout against the back-office API.

use ambassador_core::types::{LoginCredentials, LoginResponse, Subject};
use ambassador_core::{Authenticator, Result};
use reqwest::Method;
use validator::Validate;

use crate::connect::{ApiClient, TRACING_TARGET};
use crate::error::ClientError;

/// Path of the login endpoint, relative to the API prefix.
const LOGIN_PATH: &str = "/admin/login";

/// Path of the logout endpoint, relative to the bare host.
const LOGOUT_PATH: &str = "/logout";

#[async_trait::async_trait]
impl Authenticator for ApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Subject> {
        credentials.validate()?;

        let mut body = serde_json::Map::new();
        body.insert(
            self.config().login_identifier_field.clone(),
            credentials.identifier.clone().into(),
        );
        body.insert("password".to_owned(), credentials.password.clone().into());

        tracing::debug!(
            target: TRACING_TARGET,
            identifier = %credentials.identifier,
            "Submitting login"
        );

        let url = self.url(LOGIN_PATH)?;
        let raw = self
            .execute_keeping_credential(self.request(Method::POST, url).json(&body))
            .await?;
        let response: LoginResponse = serde_json::from_slice(&raw).map_err(ClientError::from)?;
        let subject = response.into_subject()?;

        tracing::info!(
            target: TRACING_TARGET,
            identifier = %credentials.identifier,
            has_token = subject.token.is_some(),
            "Login accepted"
        );

        Ok(subject)
    }

    async fn logout(&self) -> Result<()> {
        let url = self.host_url(LOGOUT_PATH)?;
        self.send_unit(self.request(Method::POST, url)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ambassador_core::types::EntityId;
    use ambassador_core::{CredentialState, ErrorKind};
    use axum::Json;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;
    use crate::service::fixtures;

    #[tokio::test]
    async fn test_login_posts_configured_identifier_field() {
        let seen = Arc::new(Mutex::new(Value::Null));
        let router = axum::Router::new()
            .route(
                "/api/admin/login",
                post(|State(seen): State<Arc<Mutex<Value>>>, Json(body): Json<Value>| async move {
                    *seen.lock().unwrap() = body;
                    Json(json!({
                        "success": true,
                        "data": { "id": 7, "adminName": "root", "token": "jwt" }
                    }))
                }),
            )
            .with_state(seen.clone());
        let host = fixtures::serve(router).await;

        let client = fixtures::client(&host);
        let subject = client
            .login(&LoginCredentials::new("root", "secret"))
            .await
            .unwrap();

        assert_eq!(subject.id, Some(EntityId::from(7)));
        assert_eq!(subject.token.as_deref(), Some("jwt"));
        assert_eq!(
            *seen.lock().unwrap(),
            json!({ "adminName": "root", "password": "secret" })
        );
    }

    #[tokio::test]
    async fn test_login_rejection_is_an_authentication_error() {
        let router = axum::Router::new().route(
            "/api/admin/login",
            post(|| async { Json(json!({ "success": false, "error": "Invalid password" })) }),
        );
        let host = fixtures::serve(router).await;

        let error = fixtures::client(&host)
            .login(&LoginCredentials::new("root", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Authentication);
        assert_eq!(error.message(), "Invalid password");
    }

    #[tokio::test]
    async fn test_rejected_relogin_keeps_active_credential() {
        let router = axum::Router::new().route(
            "/api/admin/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "success": false, "message": "Invalid password" })),
                )
            }),
        );
        let host = fixtures::serve(router).await;

        let client = fixtures::client(&host);
        client.credentials().attach(Some("jwt"));
        let error = client
            .login(&LoginCredentials::new("root", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(error.status(), 401);
        assert_eq!(client.credentials().state(), CredentialState::Attached);
        assert_eq!(client.credentials().bearer().as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn test_login_validates_before_sending() {
        let client = fixtures::client("http://127.0.0.1:9");
        let error = client
            .login(&LoginCredentials::new("", "secret"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(error.status(), 0);
    }

    #[tokio::test]
    async fn test_logout_uses_bare_host_with_bearer() {
        let seen = Arc::new(Mutex::new(String::new()));
        let router = axum::Router::new()
            .route(
                "/logout",
                post(|State(seen): State<Arc<Mutex<String>>>, headers: HeaderMap| async move {
                    *seen.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_owned();
                    Json(json!({ "success": true }))
                }),
            )
            .with_state(seen.clone());
        let host = fixtures::serve(router).await;

        let client = fixtures::client(&host);
        client.credentials().attach(Some("jwt"));
        client.logout().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), "Bearer jwt");
    }
}
