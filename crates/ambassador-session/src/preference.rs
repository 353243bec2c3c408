//! Operator language preference.

use ambassador_core::Result;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::TRACING_TARGET_STORE;
use crate::store::SharedStore;

/// Store key of the language preference.
pub const LANGUAGE_KEY: &str = "admin-language";

/// Display language of the back office.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

/// Durable operator preferences.
#[derive(Clone)]
pub struct Preferences {
    store: SharedStore,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

impl Preferences {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Returns the stored language, or the default when unset or unknown.
    pub async fn language(&self) -> Result<Language> {
        let Some(raw) = self.store.get(LANGUAGE_KEY).await? else {
            return Ok(Language::default());
        };

        let language = raw.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(
                target: TRACING_TARGET_STORE,
                value = %raw,
                "Ignoring unknown language preference"
            );
            Language::default()
        });
        Ok(language)
    }

    /// Stores the language.
    pub async fn set_language(&self, language: Language) -> Result<()> {
        self.store.set(LANGUAGE_KEY, language.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::{MemoryStore, StoreBackend};

    #[tokio::test]
    async fn test_language_defaults_and_persists() {
        let backend = MemoryStore::new();
        let preferences = Preferences::new(Arc::new(backend.clone()));

        assert_eq!(preferences.language().await.unwrap(), Language::En);

        preferences.set_language(Language::Zh).await.unwrap();
        assert_eq!(backend.get(LANGUAGE_KEY).await.unwrap().as_deref(), Some("zh"));
        assert_eq!(preferences.language().await.unwrap(), Language::Zh);
    }

    #[tokio::test]
    async fn test_unknown_language_reads_as_default() {
        let backend = MemoryStore::new();
        backend.set(LANGUAGE_KEY, "fr").await.unwrap();

        let preferences = Preferences::new(Arc::new(backend));
        assert_eq!(preferences.language().await.unwrap(), Language::En);
    }
}
