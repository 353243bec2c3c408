//! Optimistic updates of customer permission flags.

mod board;
mod state;

pub use board::{PendingToggle, SettingsBoard};
pub use state::{ToggleOutcome, ToggleState};
