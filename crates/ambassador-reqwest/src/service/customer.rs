//! Customer-specific operations.

use ambassador_core::types::{Customer, EntityId};
use ambassador_core::{Error, Resource, Result, SettingsPatch, SettingsWriter};
use reqwest::Method;

use crate::connect::{ApiClient, TRACING_TARGET};

impl ApiClient {
    /// Sends `PATCH /customers/:id/settings` with exactly the given flags.
    pub async fn update_customer_settings(
        &self,
        id: &EntityId,
        patch: &SettingsPatch,
    ) -> Result<()> {
        if patch.is_empty() {
            return Err(Error::invalid_input().with_message("settings patch is empty"));
        }

        let path = format!("{}/settings", Customer::item_path(id));
        self.write_json(Method::PATCH, &path, patch).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            id = %id,
            settings = ?patch,
            "Customer settings updated"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl SettingsWriter for ApiClient {
    async fn update_settings(&self, entity_id: &EntityId, patch: &SettingsPatch) -> Result<()> {
        self.update_customer_settings(entity_id, patch).await
    }
}
