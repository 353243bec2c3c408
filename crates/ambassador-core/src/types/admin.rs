//! Back-office administrator accounts.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// An administrator account as listed by `GET /admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: EntityId,
    pub user_name: Option<String>,
    pub wa_url: Option<String>,
    pub telegram_url: Option<String>,
    pub created_date: Option<String>,
}
