//! Ledger records and master-data lookups.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::{EntityId, amount};

/// A deposit made to a customer's wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    pub id: EntityId,
    #[serde(alias = "customerID")]
    pub customer_id: Option<EntityId>,
    pub login_user_name: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub amount: Option<BigDecimal>,
    pub remark: Option<String>,
    pub created_by: Option<String>,
    pub created_date: Option<String>,
}

/// A balance movement on a customer's wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: EntityId,
    #[serde(alias = "customerID")]
    pub customer_id: Option<EntityId>,
    pub login_user_name: Option<String>,
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub amount: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub balance_after: Option<BigDecimal>,
    pub description: Option<String>,
    pub created_date: Option<String>,
}

/// A generic id and name pair: currencies, projects, sales statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedItem {
    pub id: EntityId,
    #[serde(alias = "currencyName", alias = "projectName", alias = "statusName")]
    pub name: Option<String>,
    pub code: Option<String>,
}

impl NamedItem {
    /// Returns the display name, falling back to the code.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.code.as_deref())
            .unwrap_or_default()
    }
}
