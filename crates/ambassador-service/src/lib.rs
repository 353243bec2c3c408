#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for optimistic settings updates.
pub const TRACING_TARGET_TOGGLE: &str = "ambassador_service::toggle";

/// Tracing target for list fetches.
pub const TRACING_TARGET_LIST: &str = "ambassador_service::list";

mod list;
mod toggle;

pub use list::ListController;
pub use toggle::{PendingToggle, SettingsBoard, ToggleOutcome, ToggleState};
