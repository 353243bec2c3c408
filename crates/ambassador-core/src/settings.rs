//! Toggleable customer permission flags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::types::EntityId;

/// One of the boolean permission flags carried by a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CustomerSetting {
    IsActualAccount,
    IsAllowToTakeTask,
    IsAllowToCompleteTask,
    IsAllowToWithdrawWithoutTask,
    IsAllowToWithdraw,
    IsAllowToWithdrawWhenPresetTask,
    IsAllowToUseReferralCode,
    IsUnconditionalWithdrawalAllowed,
}

impl CustomerSetting {
    /// Value assumed when the backend omits the flag.
    #[must_use]
    pub const fn default_value(self) -> bool {
        matches!(
            self,
            Self::IsActualAccount
                | Self::IsAllowToTakeTask
                | Self::IsAllowToCompleteTask
                | Self::IsAllowToWithdraw
                | Self::IsAllowToUseReferralCode
        )
    }

    /// Whether the flag is displayed negated.
    ///
    /// `isAllowToWithdrawWithoutTask` is shown as "not allowed to withdraw
    /// without task". Only the presentation flips; the stored value does not.
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::IsAllowToWithdrawWithoutTask)
    }

    /// Human-readable label of the flag as displayed.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IsActualAccount => "Actual account",
            Self::IsAllowToTakeTask => "Allowed to take task",
            Self::IsAllowToCompleteTask => "Allowed to complete task",
            Self::IsAllowToWithdrawWithoutTask => "Not allowed to withdraw without task",
            Self::IsAllowToWithdraw => "Allowed to withdraw",
            Self::IsAllowToWithdrawWhenPresetTask => "Allowed to withdraw when preset task",
            Self::IsAllowToUseReferralCode => "Allowed to use referral code",
            Self::IsUnconditionalWithdrawalAllowed => "Unconditional withdrawal allowed",
        }
    }
}

/// Resolved values of every flag of one customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountSettings(BTreeMap<CustomerSetting, bool>);

impl AccountSettings {
    /// Builds a full set of flags from a resolver.
    pub fn from_fn(mut resolve: impl FnMut(CustomerSetting) -> bool) -> Self {
        Self(
            CustomerSetting::iter()
                .map(|setting| (setting, resolve(setting)))
                .collect(),
        )
    }

    /// Returns the value of a flag, its default when unset.
    pub fn get(&self, setting: CustomerSetting) -> bool {
        self.0
            .get(&setting)
            .copied()
            .unwrap_or(setting.default_value())
    }

    /// Sets a flag, returning its previous value.
    pub fn set(&mut self, setting: CustomerSetting, value: bool) -> bool {
        self.0
            .insert(setting, value)
            .unwrap_or(setting.default_value())
    }

    /// Iterates over every flag in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CustomerSetting, bool)> + '_ {
        CustomerSetting::iter().map(|setting| (setting, self.get(setting)))
    }
}

/// Partial update body carrying exactly the changed flags.
///
/// Serializes to `{"<settingKey>": <value>}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsPatch(BTreeMap<CustomerSetting, bool>);

impl SettingsPatch {
    /// A patch changing a single flag.
    pub fn single(setting: CustomerSetting, value: bool) -> Self {
        Self(BTreeMap::from([(setting, value)]))
    }

    /// Adds a flag to the patch.
    pub fn with(mut self, setting: CustomerSetting, value: bool) -> Self {
        self.0.insert(setting, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CustomerSetting, bool)> + '_ {
        self.0.iter().map(|(setting, value)| (*setting, *value))
    }
}

/// One flag of one customer as presented for toggling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleableSetting {
    pub entity_id: EntityId,
    pub setting_key: CustomerSetting,
    /// The value the backend is believed to hold.
    pub value: bool,
    pub inverted: bool,
}

impl ToggleableSetting {
    pub fn new(entity_id: EntityId, setting_key: CustomerSetting, value: bool) -> Self {
        Self {
            entity_id,
            setting_key,
            value,
            inverted: setting_key.is_inverted(),
        }
    }

    /// Value as shown to the operator.
    pub fn displayed(&self) -> bool {
        self.value != self.inverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_serializes_single_key() {
        let patch = SettingsPatch::single(CustomerSetting::IsAllowToWithdraw, false);
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "isAllowToWithdraw": false }));
    }

    #[test]
    fn test_setting_parses_wire_name() {
        let setting: CustomerSetting = "isAllowToUseReferralCode".parse().unwrap();
        assert_eq!(setting, CustomerSetting::IsAllowToUseReferralCode);
        assert_eq!(setting.as_ref(), "isAllowToUseReferralCode");
    }

    #[test]
    fn test_inverted_display() {
        let setting = ToggleableSetting::new(
            EntityId::from(3),
            CustomerSetting::IsAllowToWithdrawWithoutTask,
            false,
        );
        assert!(setting.inverted);
        assert!(setting.displayed());
        assert!(!setting.value);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut settings = AccountSettings::default();
        assert!(settings.set(CustomerSetting::IsActualAccount, false));
        assert!(!settings.get(CustomerSetting::IsActualAccount));
        assert!(!settings.set(CustomerSetting::IsActualAccount, true));
    }

    #[test]
    fn test_from_fn_covers_every_flag() {
        let settings = AccountSettings::from_fn(|_| false);
        assert_eq!(settings.iter().filter(|(_, value)| !value).count(), 8);
    }
}
