//! The settings board and its pending toggles.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ambassador_core::types::{Customer, EntityId};
use ambassador_core::{
    AccountSettings, CustomerSetting, SettingsPatch, SettingsWriter, ToggleableSetting,
};
use tokio_util::sync::CancellationToken;

use super::state::Field;
use super::{ToggleOutcome, ToggleState};
use crate::TRACING_TARGET_TOGGLE;

type FieldKey = (EntityId, CustomerSetting);

struct BoardInner {
    writer: Arc<dyn SettingsWriter>,
    fields: Mutex<HashMap<FieldKey, Field>>,
    cancel: CancellationToken,
}

impl BoardInner {
    fn fields(&self) -> MutexGuard<'_, HashMap<FieldKey, Field>> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Locally held permission flags of any number of customers.
///
/// Each toggle flips the flag immediately, then sends a partial update with
/// exactly that flag. A rejected update restores the last value the backend
/// accepted, unless a newer toggle of the same flag has been started since.
#[derive(Clone)]
pub struct SettingsBoard {
    inner: Arc<BoardInner>,
}

impl fmt::Debug for SettingsBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsBoard")
            .field("fields", &self.inner.fields().len())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl SettingsBoard {
    /// Creates an empty board writing through `writer`.
    pub fn new(writer: Arc<dyn SettingsWriter>) -> Self {
        Self {
            inner: Arc::new(BoardInner {
                writer,
                fields: Mutex::new(HashMap::new()),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Replaces the local flags of one customer.
    ///
    /// Toggles still in flight for a reloaded flag settle as superseded.
    pub fn load(&self, entity_id: &EntityId, settings: &AccountSettings) {
        let mut fields = self.inner.fields();
        for (setting, value) in settings.iter() {
            fields
                .entry((entity_id.clone(), setting))
                .and_modify(|field| field.reload(value))
                .or_insert_with(|| Field::loaded(value));
        }
    }

    /// Loads the flags of every customer of a fetched page.
    pub fn load_customers<'a>(&self, customers: impl IntoIterator<Item = &'a Customer>) {
        for customer in customers {
            self.load(&customer.id, &customer.settings());
        }
    }

    /// Returns the local value of a flag.
    ///
    /// A flag that was never loaded reads as its default.
    pub fn value(&self, entity_id: &EntityId, setting: CustomerSetting) -> bool {
        self.inner
            .fields()
            .get(&(entity_id.clone(), setting))
            .map_or_else(|| setting.default_value(), |field| field.value)
    }

    /// Returns the toggle state of a flag.
    pub fn state(&self, entity_id: &EntityId, setting: CustomerSetting) -> ToggleState {
        self.inner
            .fields()
            .get(&(entity_id.clone(), setting))
            .map(|field| field.state)
            .unwrap_or_default()
    }

    /// Returns a flag as presented to the operator.
    pub fn setting(&self, entity_id: &EntityId, setting: CustomerSetting) -> ToggleableSetting {
        ToggleableSetting::new(entity_id.clone(), setting, self.value(entity_id, setting))
    }

    /// Returns every local flag of one customer.
    pub fn snapshot(&self, entity_id: &EntityId) -> AccountSettings {
        AccountSettings::from_fn(|setting| self.value(entity_id, setting))
    }

    /// Flips a flag locally and returns the update to settle.
    ///
    /// Returns `None` once the board is closed.
    pub fn begin(&self, entity_id: &EntityId, setting: CustomerSetting) -> Option<PendingToggle> {
        if self.is_closed() {
            return None;
        }

        let mut fields = self.inner.fields();
        let field = fields
            .entry((entity_id.clone(), setting))
            .or_insert_with(|| Field::loaded(setting.default_value()));

        let previous = field.value;
        field.value = !previous;
        field.generation += 1;
        field.state = ToggleState::Pending;

        let generation = field.generation;
        drop(fields);

        tracing::debug!(
            target: TRACING_TARGET_TOGGLE,
            entity_id = %entity_id,
            setting = %setting,
            value = !previous,
            generation,
            "Applied optimistic toggle"
        );

        Some(PendingToggle {
            board: self.inner.clone(),
            entity_id: entity_id.clone(),
            setting,
            previous,
            generation,
        })
    }

    /// Flips a flag and waits for the backend.
    ///
    /// Failures are logged and rolled back, never returned.
    pub async fn toggle(&self, entity_id: &EntityId, setting: CustomerSetting) -> ToggleOutcome {
        match self.begin(entity_id, setting) {
            Some(pending) => pending.settle().await,
            None => ToggleOutcome::Abandoned,
        }
    }

    /// Stops every later settle from touching the board.
    pub fn close(&self) {
        self.inner.cancel.cancel();
    }

    /// Returns `true` once [`close`](Self::close) was called.
    pub fn is_closed(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }
}

/// A locally applied toggle whose update has not been sent yet.
#[must_use = "a pending toggle does nothing until settled"]
pub struct PendingToggle {
    board: Arc<BoardInner>,
    entity_id: EntityId,
    setting: CustomerSetting,
    previous: bool,
    generation: u64,
}

impl fmt::Debug for PendingToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingToggle")
            .field("entity_id", &self.entity_id)
            .field("setting", &self.setting)
            .field("value", &self.value())
            .field("generation", &self.generation)
            .finish()
    }
}

impl PendingToggle {
    /// The value applied locally and sent to the backend.
    pub fn value(&self) -> bool {
        !self.previous
    }

    /// The local value before this toggle.
    pub fn previous(&self) -> bool {
        self.previous
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sends the update and commits or rolls back the local value.
    pub async fn settle(self) -> ToggleOutcome {
        if self.board.cancel.is_cancelled() {
            return ToggleOutcome::Abandoned;
        }

        let patch = SettingsPatch::single(self.setting, self.value());
        let result = self
            .board
            .writer
            .update_settings(&self.entity_id, &patch)
            .await;

        if self.board.cancel.is_cancelled() {
            tracing::debug!(
                target: TRACING_TARGET_TOGGLE,
                entity_id = %self.entity_id,
                setting = %self.setting,
                "Board closed before the update settled"
            );
            return ToggleOutcome::Abandoned;
        }

        let mut fields = self.board.fields();
        let Some(field) = fields.get_mut(&(self.entity_id.clone(), self.setting)) else {
            return ToggleOutcome::Abandoned;
        };
        let current = field.generation == self.generation;

        match result {
            Ok(()) => {
                field.confirmed = self.value();
                if current {
                    field.state = ToggleState::Committed;
                } else if field.state == ToggleState::RolledBack {
                    // The newer toggle already restored an older confirmed value.
                    field.value = field.confirmed;
                }
                ToggleOutcome::Committed
            }
            Err(error) if current => {
                field.value = field.confirmed;
                field.state = ToggleState::RolledBack;
                let restored = field.value;
                drop(fields);

                tracing::warn!(
                    target: TRACING_TARGET_TOGGLE,
                    entity_id = %self.entity_id,
                    setting = %self.setting,
                    restored,
                    status = error.status(),
                    error = %error,
                    "Settings update failed, rolled back"
                );
                ToggleOutcome::RolledBack
            }
            Err(error) => {
                drop(fields);

                tracing::warn!(
                    target: TRACING_TARGET_TOGGLE,
                    entity_id = %self.entity_id,
                    setting = %self.setting,
                    error = %error,
                    "Settings update failed, newer toggle kept"
                );
                ToggleOutcome::Superseded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ambassador_test::MockSettingsWriter;

    use super::*;

    const SETTING: CustomerSetting = CustomerSetting::IsAllowToWithdraw;

    fn board(writer: &MockSettingsWriter) -> SettingsBoard {
        SettingsBoard::new(Arc::new(writer.clone()))
    }

    fn customer(id: i64) -> EntityId {
        EntityId::from(id)
    }

    #[tokio::test]
    async fn test_successful_toggle_commits() {
        let writer = MockSettingsWriter::new();
        let board = board(&writer);
        board.load(
            &customer(1),
            &AccountSettings::from_fn(|setting| setting == SETTING),
        );

        let pending = board.begin(&customer(1), SETTING).unwrap();
        assert!(!board.value(&customer(1), SETTING));
        assert_eq!(board.state(&customer(1), SETTING), ToggleState::Pending);

        assert_eq!(pending.settle().await, ToggleOutcome::Committed);
        assert!(!board.value(&customer(1), SETTING));
        assert_eq!(board.state(&customer(1), SETTING), ToggleState::Committed);

        let calls = writer.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, customer(1));
        assert_eq!(calls[0].1, SettingsPatch::single(SETTING, false));
    }

    #[tokio::test]
    async fn test_failed_toggle_rolls_back() {
        let writer = MockSettingsWriter::failing();
        let board = board(&writer);
        board.load(&customer(1), &AccountSettings::from_fn(|_| true));

        let outcome = board.toggle(&customer(1), SETTING).await;
        assert_eq!(outcome, ToggleOutcome::RolledBack);
        assert!(board.value(&customer(1), SETTING));
        assert_eq!(board.state(&customer(1), SETTING), ToggleState::RolledBack);
        assert_eq!(writer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_older_failure_does_not_revert_newer_toggle() {
        let writer = MockSettingsWriter::new();
        let board = board(&writer);
        board.load(&customer(1), &AccountSettings::from_fn(|_| false));

        let first = board.begin(&customer(1), SETTING).unwrap();
        let second = board.begin(&customer(1), SETTING).unwrap();
        assert_eq!(second.generation(), first.generation() + 1);
        assert!(!board.value(&customer(1), SETTING));

        writer.set_failing(true);
        assert_eq!(first.settle().await, ToggleOutcome::Superseded);
        assert!(!board.value(&customer(1), SETTING));
        assert_eq!(board.state(&customer(1), SETTING), ToggleState::Pending);

        writer.set_failing(false);
        assert_eq!(second.settle().await, ToggleOutcome::Committed);
        assert_eq!(board.state(&customer(1), SETTING), ToggleState::Committed);
    }

    #[tokio::test]
    async fn test_overlapping_failures_restore_backend_value() {
        let writer = MockSettingsWriter::failing();
        let board = board(&writer);
        board.load(&customer(1), &AccountSettings::from_fn(|_| false));

        let first = board.begin(&customer(1), SETTING).unwrap();
        let second = board.begin(&customer(1), SETTING).unwrap();
        assert!(first.value() && second.previous());
        assert!(!board.value(&customer(1), SETTING));

        assert_eq!(first.settle().await, ToggleOutcome::Superseded);
        assert_eq!(second.settle().await, ToggleOutcome::RolledBack);
        assert!(!board.value(&customer(1), SETTING));
        assert_eq!(board.state(&customer(1), SETTING), ToggleState::RolledBack);
        assert_eq!(writer.call_count(), 2);
    }

    #[tokio::test]
    async fn test_rollback_keeps_earlier_commit() {
        let writer = MockSettingsWriter::new();
        let board = board(&writer);
        board.load(&customer(1), &AccountSettings::from_fn(|_| false));

        let first = board.begin(&customer(1), SETTING).unwrap();
        let second = board.begin(&customer(1), SETTING).unwrap();
        assert_eq!(first.settle().await, ToggleOutcome::Committed);

        writer.set_failing(true);
        assert_eq!(second.settle().await, ToggleOutcome::RolledBack);
        assert!(board.value(&customer(1), SETTING));
    }

    #[tokio::test]
    async fn test_reload_supersedes_pending_toggle() {
        let writer = MockSettingsWriter::failing();
        let board = board(&writer);
        board.load(&customer(1), &AccountSettings::from_fn(|_| false));

        let stale = board.begin(&customer(1), SETTING).unwrap();
        board.load(&customer(1), &AccountSettings::from_fn(|_| true));
        assert_eq!(board.state(&customer(1), SETTING), ToggleState::Idle);

        let fresh = board.begin(&customer(1), SETTING).unwrap();
        assert_ne!(fresh.generation(), stale.generation());
        assert!(!board.value(&customer(1), SETTING));

        assert_eq!(stale.settle().await, ToggleOutcome::Superseded);
        assert!(!board.value(&customer(1), SETTING));
        assert_eq!(board.state(&customer(1), SETTING), ToggleState::Pending);

        assert_eq!(fresh.settle().await, ToggleOutcome::RolledBack);
        assert!(board.value(&customer(1), SETTING));
    }

    #[tokio::test]
    async fn test_unloaded_flag_starts_from_default() {
        let writer = MockSettingsWriter::new();
        let board = board(&writer);
        let setting = CustomerSetting::IsUnconditionalWithdrawalAllowed;

        assert!(!board.value(&customer(2), setting));
        assert_eq!(board.toggle(&customer(2), setting).await, ToggleOutcome::Committed);
        assert!(board.value(&customer(2), setting));
    }

    #[tokio::test]
    async fn test_closed_board_ignores_settles() {
        let writer = MockSettingsWriter::failing();
        let board = board(&writer);
        board.load(&customer(1), &AccountSettings::from_fn(|_| true));

        let pending = board.begin(&customer(1), SETTING).unwrap();
        board.close();

        assert_eq!(pending.settle().await, ToggleOutcome::Abandoned);
        assert!(!board.value(&customer(1), SETTING));
        assert_eq!(writer.call_count(), 0);
        assert!(board.begin(&customer(1), SETTING).is_none());
    }

    #[tokio::test]
    async fn test_toggles_of_different_customers_are_independent() {
        let writer = MockSettingsWriter::new();
        let board = board(&writer);
        board.load(&customer(1), &AccountSettings::from_fn(|_| true));
        board.load(&customer(2), &AccountSettings::from_fn(|_| true));

        let (first_id, second_id) = (customer(1), customer(2));
        let (a, b) = tokio::join!(
            board.toggle(&first_id, SETTING),
            board.toggle(&second_id, CustomerSetting::IsActualAccount)
        );
        assert!(a.is_committed() && b.is_committed());

        let first = board.snapshot(&customer(1));
        assert!(!first.get(SETTING));
        assert!(first.get(CustomerSetting::IsActualAccount));

        let second = board.snapshot(&customer(2));
        assert!(second.get(SETTING));
        assert!(!second.get(CustomerSetting::IsActualAccount));
    }

    #[tokio::test]
    async fn test_inverted_flag_display() {
        let board = board(&MockSettingsWriter::new());
        let setting = CustomerSetting::IsAllowToWithdrawWithoutTask;
        board.load(&customer(1), &AccountSettings::from_fn(|_| false));

        let shown = board.setting(&customer(1), setting);
        assert!(!shown.value);
        assert!(shown.displayed());
    }

    #[tokio::test]
    async fn test_load_customers() {
        let customer: Customer = serde_json::from_value(serde_json::json!({
            "id": 9,
            "isAllowToWithdraw": false,
        }))
        .unwrap();

        let board = board(&MockSettingsWriter::new());
        board.load_customers([&customer]);
        assert!(!board.value(&EntityId::from(9), SETTING));
        assert!(board.value(&EntityId::from(9), CustomerSetting::IsActualAccount));
    }
}
