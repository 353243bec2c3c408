//! Per-field toggle states.

use serde::Serialize;
use strum::{AsRefStr, Display};

/// Lifecycle of one optimistically updated flag.
///
/// `Idle -> Pending -> Committed | RolledBack`; a new toggle on a settled
/// field starts again from `Pending`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToggleState {
    /// Never toggled since it was loaded.
    #[default]
    Idle,
    /// Flipped locally; the update has not settled.
    Pending,
    /// The backend accepted the update.
    Committed,
    /// The backend rejected the update; the previous value was restored.
    RolledBack,
}

/// Result of settling one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToggleOutcome {
    /// The new value was kept.
    Committed,
    /// The update failed and the previous value was restored.
    RolledBack,
    /// The update failed, but a newer toggle owns the field now.
    Superseded,
    /// The board was closed; nothing was sent or changed.
    Abandoned,
}

impl ToggleOutcome {
    /// Returns `true` if the backend holds the toggled value.
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// Local view of one flag.
///
/// `confirmed` is the last value known to be held by the backend: the loaded
/// value or the value of the latest accepted update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    pub value: bool,
    pub confirmed: bool,
    pub generation: u64,
    pub state: ToggleState,
}

impl Field {
    pub fn loaded(value: bool) -> Self {
        Self {
            value,
            confirmed: value,
            generation: 0,
            state: ToggleState::Idle,
        }
    }

    /// Replaces the value with a freshly loaded one.
    ///
    /// The generation moves forward so toggles started before the reload
    /// never count as current.
    pub fn reload(&mut self, value: bool) {
        self.value = value;
        self.confirmed = value;
        self.generation += 1;
        self.state = ToggleState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_advances_generation() {
        let mut field = Field::loaded(false);
        field.generation = 3;
        field.state = ToggleState::Pending;

        field.reload(true);
        assert!(field.value && field.confirmed);
        assert_eq!(field.generation, 4);
        assert_eq!(field.state, ToggleState::Idle);
    }
}
