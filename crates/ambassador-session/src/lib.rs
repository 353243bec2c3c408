#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for store reads and writes.
pub const TRACING_TARGET_STORE: &str = "ambassador_session::store";

/// Tracing target for session record lifecycle events.
pub const TRACING_TARGET_SESSION: &str = "ambassador_session::session";

/// Tracing target for login, logout and invalidation.
pub const TRACING_TARGET_AUTH: &str = "ambassador_session::auth";

mod auth;
mod config;
mod preference;

pub mod session;
pub mod store;

pub use auth::{AuthController, AuthState};
pub use config::{DEFAULT_SESSION_TTL_DAYS, DEFAULT_STATE_DIR, StoreConfig};
pub use preference::{LANGUAGE_KEY, Language, Preferences};
pub use session::{SessionManager, SessionRecord};
