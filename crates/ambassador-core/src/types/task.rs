//! Task-catalog entries and customer task assignments.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{EntityId, amount};

/// An entry of the task catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub name: Option<String>,
    pub code: Option<String>,
    /// Price of the task.
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub task_value: Option<BigDecimal>,
    pub image_url: Option<String>,
    pub created_date: Option<String>,
}

/// Payload for creating or replacing a catalog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub task_value: BigDecimal,
}

/// A task assigned to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTask {
    pub id: EntityId,
    #[serde(alias = "customerID")]
    pub customer_id: Option<EntityId>,
    pub details: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub price: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub profit: Option<BigDecimal>,
    pub status: Option<String>,
    pub created_date: Option<String>,
}
