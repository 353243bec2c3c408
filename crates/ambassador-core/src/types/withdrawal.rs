//! Withdrawal requests and their approval status.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{EntityId, amount};

/// Approval status of a withdrawal, encoded as `statusID` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl WithdrawalStatus {
    /// Returns the numeric status id used by the backend.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Pending => 1,
            Self::Approved => 2,
            Self::Rejected => 3,
        }
    }

    /// Maps a backend status id back to a status.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Approved),
            3 => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A withdrawal request as listed for approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: EntityId,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub amount: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub asset_balance: Option<BigDecimal>,
    #[serde(rename = "statusID")]
    pub status_id: Option<i64>,
    pub login_user_name: Option<String>,
    pub client_name: Option<String>,
    pub customer_phone_number: Option<String>,
    pub number_code: Option<String>,
    pub referrer_customer_login_user_name: Option<String>,
    pub bank_account_holder_name: Option<String>,
    pub bank_vendor_name: Option<String>,
    pub manual_bank_name: Option<String>,
    pub second_bank_account_number: Option<String>,
    pub created_date: Option<String>,
    pub updated_by: Option<String>,
}

impl Withdrawal {
    /// Returns the decoded status, if the id is known.
    pub fn status(&self) -> Option<WithdrawalStatus> {
        self.status_id.and_then(WithdrawalStatus::from_id)
    }
}

/// Body of `PATCH /withdrawals/:id/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(rename = "statusID")]
    pub status_id: i64,
}

impl From<WithdrawalStatus> for StatusUpdate {
    fn from(status: WithdrawalStatus) -> Self {
        Self {
            status_id: status.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            WithdrawalStatus::Pending,
            WithdrawalStatus::Approved,
            WithdrawalStatus::Rejected,
        ] {
            assert_eq!(WithdrawalStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(WithdrawalStatus::from_id(9), None);
    }

    #[test]
    fn test_status_update_body() {
        let body = serde_json::to_value(StatusUpdate::from(WithdrawalStatus::Approved)).unwrap();
        assert_eq!(body, serde_json::json!({ "statusID": 2 }));
    }
}
