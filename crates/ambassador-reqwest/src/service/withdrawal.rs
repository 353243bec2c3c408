//! Withdrawal approval.

use ambassador_core::types::{EntityId, StatusUpdate, Withdrawal, WithdrawalStatus};
use ambassador_core::{Resource, Result};
use reqwest::Method;

use crate::connect::{ApiClient, TRACING_TARGET};

impl ApiClient {
    /// Sends `PATCH /withdrawals/:id/status`.
    pub async fn update_withdrawal_status(
        &self,
        id: &EntityId,
        status: WithdrawalStatus,
    ) -> Result<()> {
        let path = format!("{}/status", Withdrawal::item_path(id));
        self.write_json(Method::PATCH, &path, &StatusUpdate::from(status))
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            id = %id,
            status = %status,
            "Withdrawal status updated"
        );
        Ok(())
    }

    /// Approves a pending withdrawal.
    pub async fn approve_withdrawal(&self, id: &EntityId) -> Result<()> {
        self.update_withdrawal_status(id, WithdrawalStatus::Approved)
            .await
    }

    /// Rejects a pending withdrawal.
    pub async fn reject_withdrawal(&self, id: &EntityId) -> Result<()> {
        self.update_withdrawal_status(id, WithdrawalStatus::Rejected)
            .await
    }
}
