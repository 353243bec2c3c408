//! Durable key/value storage for client-side state.
//!
//! A missing key reads as `None` and removing a missing key is not an error.
//! Values written through [`FileStore`] survive restarts.

mod file_store;
mod json_store;
mod memory_store;

use std::sync::Arc;

use ambassador_core::Result;
pub use file_store::FileStore;
pub use json_store::JsonStore;
pub use memory_store::MemoryStore;

/// Storage backend holding one string value per key.
#[async_trait::async_trait]
pub trait StoreBackend: Send + Sync {
    /// Reads the value of a key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes the value of a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Shared handle to a storage backend.
pub type SharedStore = Arc<dyn StoreBackend>;
