//! Customer records and payloads.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{EntityId, amount};
use crate::settings::{AccountSettings, CustomerSetting};

/// Boolean permission flags attached to a customer.
///
/// Flags missing from a response stay `None`; [`CustomerFlags::settings`]
/// resolves them to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_actual_account: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_allow_to_take_task: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_allow_to_complete_task: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_allow_to_withdraw_without_task: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_allow_to_withdraw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_allow_to_withdraw_when_preset_task: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_allow_to_use_referral_code: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unconditional_withdrawal_allowed: Option<bool>,
}

impl CustomerFlags {
    /// Returns the raw value of a flag, if the backend sent one.
    pub fn get(&self, setting: CustomerSetting) -> Option<bool> {
        match setting {
            CustomerSetting::IsActualAccount => self.is_actual_account,
            CustomerSetting::IsAllowToTakeTask => self.is_allow_to_take_task,
            CustomerSetting::IsAllowToCompleteTask => self.is_allow_to_complete_task,
            CustomerSetting::IsAllowToWithdrawWithoutTask => {
                self.is_allow_to_withdraw_without_task
            }
            CustomerSetting::IsAllowToWithdraw => self.is_allow_to_withdraw,
            CustomerSetting::IsAllowToWithdrawWhenPresetTask => {
                self.is_allow_to_withdraw_when_preset_task
            }
            CustomerSetting::IsAllowToUseReferralCode => self.is_allow_to_use_referral_code,
            CustomerSetting::IsUnconditionalWithdrawalAllowed => {
                self.is_unconditional_withdrawal_allowed
            }
        }
    }

    /// Resolves every flag, substituting defaults for missing ones.
    pub fn settings(&self) -> AccountSettings {
        AccountSettings::from_fn(|setting| self.get(setting).unwrap_or(setting.default_value()))
    }
}

/// A customer as returned by the list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: EntityId,
    pub login_user_name: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub number_code: Option<String>,
    pub referral_code: Option<String>,
    pub recommend_by: Option<String>,
    #[serde(rename = "customerStatusID")]
    pub customer_status_id: Option<i64>,
    #[serde(rename = "ambassadorLevelID")]
    pub ambassador_level_id: Option<EntityId>,
    pub ambassador_level_name: Option<String>,
    pub credit_score: Option<i64>,

    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub asset_balance: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub actual_wallet_balance: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub total_deposit_amount: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub today_task_profit: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub all_time_task_profit: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub current_pending_task_profit: Option<BigDecimal>,

    pub today_completed_task_count: Option<i64>,
    pub all_time_completed_task_count: Option<i64>,
    pub current_task_number: Option<i64>,
    pub current_total_round_number: Option<i64>,
    pub each_set_task_number: Option<i64>,
    pub total_task_set: Option<i64>,

    pub bank_account: Option<String>,
    pub bank_holder_name: Option<String>,
    pub bank_vendor_name: Option<String>,

    #[serde(rename = "loginLogIPAddress")]
    pub login_log_ip_address: Option<String>,
    pub login_log_country: Option<String>,
    pub login_log_region: Option<String>,
    pub login_log_city: Option<String>,
    #[serde(rename = "loginLogISP")]
    pub login_log_isp: Option<String>,
    pub login_log_created_date: Option<String>,

    pub created_by: Option<String>,
    pub created_date: Option<String>,
    /// Total number of matching rows, repeated on every row of a page.
    pub total_rows_count: Option<u64>,

    #[serde(flatten)]
    pub flags: CustomerFlags,
}

impl Customer {
    /// Returns the resolved permission flags of this customer.
    pub fn settings(&self) -> AccountSettings {
        self.flags.settings()
    }
}

/// Payload for creating a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[validate(length(min = 1, message = "login user name is required"))]
    pub login_user_name: String,
    #[validate(length(min = 1, message = "login password is required"))]
    pub login_password: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(rename = "ambassadorLevelID", skip_serializing_if = "Option::is_none")]
    pub ambassador_level_id: Option<EntityId>,
    #[serde(flatten)]
    pub flags: CustomerFlags,
}

/// Partial update of a customer; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub login_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(rename = "ambassadorLevelID", skip_serializing_if = "Option::is_none")]
    pub ambassador_level_id: Option<EntityId>,
    #[serde(rename = "customerStatusID", skip_serializing_if = "Option::is_none")]
    pub customer_status_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_partial_customer() {
        let customer: Customer = serde_json::from_value(serde_json::json!({
            "id": 12,
            "loginUserName": "alice",
            "assetBalance": "150.25",
            "loginLogIPAddress": "10.0.0.1",
            "isAllowToWithdraw": false
        }))
        .unwrap();

        assert_eq!(customer.id, EntityId::from(12));
        assert_eq!(customer.login_log_ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(customer.flags.is_allow_to_withdraw, Some(false));
        assert!(customer.flags.is_actual_account.is_none());
    }

    #[test]
    fn test_settings_apply_defaults() {
        let flags = CustomerFlags {
            is_allow_to_withdraw: Some(false),
            ..Default::default()
        };
        let settings = flags.settings();

        assert!(!settings.get(CustomerSetting::IsAllowToWithdraw));
        assert!(settings.get(CustomerSetting::IsActualAccount));
        assert!(!settings.get(CustomerSetting::IsUnconditionalWithdrawalAllowed));
    }

    #[test]
    fn test_draft_requires_login_fields() {
        let draft = CustomerDraft {
            name: "Alice".into(),
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("login_user_name"));
        assert!(errors.field_errors().contains_key("login_password"));
    }
}
