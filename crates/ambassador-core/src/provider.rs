//! Collaborator traits implemented by the HTTP client.
//!
//! The session and service layers depend on these traits rather than on a
//! concrete transport, which keeps them testable with in-memory mocks.

use crate::Result;
use crate::resource::Resource;
use crate::settings::SettingsPatch;
use crate::types::{EntityId, LoginCredentials, Subject};

/// Exchanges credentials for an authenticated subject.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticates against the remote login endpoint.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Subject>;

    /// Ends the remote session.
    async fn logout(&self) -> Result<()>;
}

/// Persists partial updates of customer permission flags.
#[async_trait::async_trait]
pub trait SettingsWriter: Send + Sync {
    /// Sends `PATCH /customers/:id/settings` with exactly the changed flags.
    async fn update_settings(&self, entity_id: &EntityId, patch: &SettingsPatch) -> Result<()>;
}

/// Fetches one page of a resource collection.
#[async_trait::async_trait]
pub trait ListSource<R: Resource>: Send + Sync {
    /// Issues the list request with the given predicates.
    ///
    /// Items are returned in backend order.
    async fn fetch(&self, filter: &R::Filter) -> Result<Vec<R>>;
}
