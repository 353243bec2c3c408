//! Mock implementations of the collaborator traits.
//!
//! The mocks share their state between clones, so a test can hand one
//! clone to the code under test and inspect the other.

mod auth;
mod list;
mod settings;

use ambassador_core::types::{EntityId, Subject};
pub use auth::MockAuthenticator;
pub use list::MockListSource;
pub use settings::MockSettingsWriter;

/// Returns an administrator subject with a bearer token.
pub fn admin_subject(id: i64) -> Subject {
    Subject {
        id: Some(EntityId::from(id)),
        admin_name: Some(format!("admin-{id}")),
        user_name: None,
        token: Some(format!("token-{id}")),
        ..Default::default()
    }
}

fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
