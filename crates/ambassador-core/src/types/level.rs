//! Ambassador (VIP) levels.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{EntityId, amount};

/// A tier configuration governing task quotas, commissions and withdrawal
/// limits for the customers assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbassadorLevel {
    pub id: EntityId,
    pub ambassador_level_name: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub cash_bonus_given: Option<BigDecimal>,
    pub each_set_task_number: Option<i64>,
    pub total_task_set: Option<i64>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub task_price_range_from: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub task_price_range_to: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub incentive_percentage: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub combo_task_incentive_percentage: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub min_withdrawal_amount: Option<BigDecimal>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub max_withdrawal_amount: Option<BigDecimal>,
    pub required_task_count_to_withdraw: Option<i64>,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub withdrawal_fees: Option<BigDecimal>,
}

/// Payload for creating or replacing a level.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_ranges"))]
pub struct AmbassadorLevelDraft {
    #[validate(length(min = 1, message = "level name is required"))]
    pub ambassador_level_name: String,
    pub cash_bonus_given: BigDecimal,
    #[validate(range(min = 1))]
    pub each_set_task_number: i64,
    #[validate(range(min = 1))]
    pub total_task_set: i64,
    pub task_price_range_from: BigDecimal,
    pub task_price_range_to: BigDecimal,
    pub incentive_percentage: BigDecimal,
    pub combo_task_incentive_percentage: BigDecimal,
    pub min_withdrawal_amount: BigDecimal,
    pub max_withdrawal_amount: BigDecimal,
    #[validate(range(min = 0))]
    pub required_task_count_to_withdraw: i64,
    pub withdrawal_fees: BigDecimal,
}

fn validate_ranges(draft: &AmbassadorLevelDraft) -> Result<(), ValidationError> {
    if draft.task_price_range_from > draft.task_price_range_to {
        return Err(ValidationError::new("task_price_range")
            .with_message("task price range is inverted".into()));
    }
    if draft.min_withdrawal_amount > draft.max_withdrawal_amount {
        return Err(ValidationError::new("withdrawal_range")
            .with_message("withdrawal range is inverted".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AmbassadorLevelDraft {
        AmbassadorLevelDraft {
            ambassador_level_name: "Gold".into(),
            each_set_task_number: 40,
            total_task_set: 3,
            task_price_range_from: BigDecimal::from(10),
            task_price_range_to: BigDecimal::from(50),
            min_withdrawal_amount: BigDecimal::from(100),
            max_withdrawal_amount: BigDecimal::from(5000),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_inverted_price_range_is_rejected() {
        let mut draft = draft();
        draft.task_price_range_from = BigDecimal::from(60);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_decodes_string_amounts() {
        let level: AmbassadorLevel = serde_json::from_value(serde_json::json!({
            "id": 1,
            "ambassadorLevelName": "Silver",
            "withdrawalFees": "2.5"
        }))
        .unwrap();
        assert_eq!(level.ambassador_level_name.as_deref(), Some("Silver"));
        assert!(level.withdrawal_fees.is_some());
    }
}
