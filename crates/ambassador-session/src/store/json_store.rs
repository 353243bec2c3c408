//! Typed JSON view over a single store key.

use std::marker::PhantomData;

use ambassador_core::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::SharedStore;
use crate::TRACING_TARGET_STORE;

/// Typed accessor for one key holding a JSON document.
pub struct JsonStore<V> {
    store: SharedStore,
    key: &'static str,
    _value: PhantomData<fn() -> V>,
}

impl<V> Clone for JsonStore<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
            _value: PhantomData,
        }
    }
}

impl<V> JsonStore<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Creates an accessor for `key`.
    pub fn new(store: SharedStore, key: &'static str) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    /// Returns the key this accessor reads and writes.
    #[inline]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Reads and decodes the value.
    ///
    /// A value that cannot be decoded is reported as a serialization error.
    pub async fn get(&self) -> Result<Option<V>> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)?;
        Ok(Some(value))
    }

    /// Encodes and writes the value.
    pub async fn set(&self, value: &V) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(self.key, &raw).await?;

        tracing::trace!(target: TRACING_TARGET_STORE, key = self.key, "Encoded value stored");
        Ok(())
    }

    /// Removes the value.
    pub async fn remove(&self) -> Result<()> {
        self.store.remove(self.key).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ambassador_core::ErrorKind;

    use super::*;
    use crate::store::{MemoryStore, StoreBackend};

    #[tokio::test]
    async fn test_typed_round_trip_and_corruption() {
        let backend = MemoryStore::new();
        let store: JsonStore<Vec<u32>> = JsonStore::new(Arc::new(backend.clone()), "numbers");

        assert_eq!(store.get().await.unwrap(), None);
        store.set(&vec![1, 2, 3]).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(vec![1, 2, 3]));

        backend.set("numbers", "{not json").await.unwrap();
        let error = store.get().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
    }
}
