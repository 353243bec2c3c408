//! Reqwest-based client for the back-office REST API.

use std::sync::Arc;

use ambassador_core::{CredentialState, Credentials, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ApiConfig;
use crate::error::{ClientError, from_response};

/// Tracing target for API client operations.
pub const TRACING_TARGET: &str = "ambassador_reqwest::client";

/// Inner client that holds the HTTP client, configuration and credential.
struct ApiClientInner {
    http: Client,
    config: ApiConfig,
    base_url: String,
    credentials: Credentials,
}

/// Client for the back-office REST API.
///
/// Cheap to clone; clones share the underlying connection pool and the
/// [`Credentials`] slot.
///
/// # Examples
///
/// ```rust,ignore
/// use ambassador_core::{Credentials, filter::CustomerFilter, types::Customer};
/// use ambassador_reqwest::{ApiClient, ApiConfig};
///
/// let client = ApiClient::new(ApiConfig::default(), Credentials::new())?;
/// let customers: Vec<Customer> = client.list(&CustomerFilter::default()).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("credentials", &self.inner.credentials)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a new client with the given configuration and credential slot.
    ///
    /// The host is not checked here; an unusable URL fails each request as a
    /// client-side error. Call [`ApiConfig::validate`] to reject it upfront.
    pub fn new(config: ApiConfig, credentials: Credentials) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();
        let base_url = config.base_url();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = timeout.as_millis(),
            "Creating API client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(ClientError::from)?;

        let inner = ApiClientInner {
            http,
            config,
            base_url,
            credentials,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Gets the credential slot attached to outbound requests.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Returns `host + prefix`.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Resolves a resource path against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", self.inner.base_url, path)).map_err(ClientError::from)?)
    }

    /// Resolves a path against the bare host, bypassing the prefix.
    pub(crate) fn host_url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        let host = self.inner.config.host();
        Ok(Url::parse(&format!("{host}/{path}")).map_err(ClientError::from)?)
    }

    /// Starts a request with the bearer credential attached, if any.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.inner.http.request(method, url);
        match self.inner.credentials.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and returns the raw body of a successful response.
    ///
    /// Non-success responses are normalized; a `401` additionally revokes the
    /// credential currently attached.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        self.dispatch(builder, true).await
    }

    /// Like [`execute`](Self::execute), but a `401` leaves the credential
    /// attached.
    ///
    /// Used for login, where a `401` rejects the submitted password rather
    /// than the active session.
    pub(crate) async fn execute_keeping_credential(
        &self,
        builder: RequestBuilder,
    ) -> Result<Vec<u8>> {
        self.dispatch(builder, false).await
    }

    async fn dispatch(&self, builder: RequestBuilder, revoke_on_401: bool) -> Result<Vec<u8>> {
        let request = builder.build().map_err(ClientError::from)?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            url = %url,
            "Sending request"
        );

        let response = match self.inner.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    method = %method,
                    url = %url,
                    timeout = err.is_timeout(),
                    error = %err,
                    "Request failed without a response"
                );
                return Err(ClientError::from(err).into());
            }
        };

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::from)?;

        if status.is_success() {
            tracing::debug!(
                target: TRACING_TARGET,
                method = %method,
                url = %url,
                status = status.as_u16(),
                "Request completed"
            );
            return Ok(body.to_vec());
        }

        let error = from_response(status.as_u16(), &body);
        tracing::warn!(
            target: TRACING_TARGET,
            method = %method,
            url = %url,
            status = status.as_u16(),
            error = %error.message(),
            "Request rejected by the server"
        );

        if revoke_on_401
            && error.is_unauthorized()
            && self.inner.credentials.state() == CredentialState::Attached
        {
            self.inner.credentials.revoke();
        }

        Err(error)
    }

    /// Sends a request and decodes the payload of a successful response.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.execute(builder).await?;
        decode_payload(&body)
    }

    /// Sends a request, discarding the response payload.
    pub(crate) async fn send_unit(&self, builder: RequestBuilder) -> Result<()> {
        self.execute(builder).await.map(|_| ())
    }

    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.send(self.request(Method::GET, url).query(query)).await
    }

    pub(crate) async fn write_json<B>(&self, method: Method, path: &str, body: &B) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.execute(self.request(method, url).json(body)).await
    }
}

/// Decodes a payload, unwrapping a `{ "data": ... }` envelope when present.
pub(crate) fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let value: serde_json::Value = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(body).map_err(ClientError::from)?
    };

    let payload = match value {
        serde_json::Value::Object(mut object) if object.contains_key("data") => {
            object.remove("data").unwrap_or_default()
        }
        other => other,
    };

    Ok(serde_json::from_value(payload).map_err(ClientError::from)?)
}
