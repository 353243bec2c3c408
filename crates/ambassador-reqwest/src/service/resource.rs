//! Generic REST operations over [`Resource`] collections.

use ambassador_core::types::{EntityId, NamedItem};
use ambassador_core::{Creatable, ListSource, MasterData, Resource, Result, Updatable};
use reqwest::Method;
use validator::Validate;

use crate::connect::{ApiClient, TRACING_TARGET, decode_payload};

impl ApiClient {
    /// Lists one page of a collection, in backend order.
    pub async fn list<R: Resource>(&self, filter: &R::Filter) -> Result<Vec<R>> {
        let items: Vec<R> = self.get_json(&format!("/{}", R::PATH), filter).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            resource = R::PATH,
            count = items.len(),
            "Fetched list"
        );

        Ok(items)
    }

    /// Reads one record.
    pub async fn get<R: Resource>(&self, id: &EntityId) -> Result<R> {
        let url = self.url(&R::detail_path(id))?;
        self.send(self.request(Method::GET, url)).await
    }

    /// Creates a record after validating the draft locally.
    ///
    /// Returns the created record when the server echoes it back.
    pub async fn create<R: Creatable>(&self, draft: &R::Draft) -> Result<Option<R>> {
        draft.validate()?;

        let body = self
            .write_json(Method::POST, &format!("/{}", R::PATH), draft)
            .await?;

        tracing::info!(target: TRACING_TARGET, resource = R::PATH, "Record created");
        Ok(decode_payload(&body).ok())
    }

    /// Partially updates a record after validating the patch locally.
    ///
    /// Returns the updated record when the server echoes it back.
    pub async fn update<R: Updatable>(&self, id: &EntityId, patch: &R::Patch) -> Result<Option<R>> {
        patch.validate()?;

        let body = self
            .write_json(Method::PATCH, &R::item_path(id), patch)
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            resource = R::PATH,
            id = %id,
            "Record updated"
        );
        Ok(decode_payload(&body).ok())
    }

    /// Deletes a record.
    pub async fn delete<R: Resource>(&self, id: &EntityId) -> Result<()> {
        let url = self.url(&R::item_path(id))?;
        self.send_unit(self.request(Method::DELETE, url)).await?;

        tracing::info!(
            target: TRACING_TARGET,
            resource = R::PATH,
            id = %id,
            "Record deleted"
        );
        Ok(())
    }

    /// Lists a master-data collection.
    pub async fn master_data(&self, kind: MasterData) -> Result<Vec<NamedItem>> {
        let url = self.url(kind.path())?;
        self.send(self.request(Method::GET, url)).await
    }
}

#[async_trait::async_trait]
impl<R: Resource> ListSource<R> for ApiClient {
    async fn fetch(&self, filter: &R::Filter) -> Result<Vec<R>> {
        self.list::<R>(filter).await
    }
}
