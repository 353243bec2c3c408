//! Persisted authentication session.

mod manager;
mod record;

pub use manager::{SESSION_KEY, SessionManager};
pub use record::{DEFAULT_SESSION_TTL, SessionRecord};
