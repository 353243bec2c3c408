//! Directory-backed store: one file per key.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use ambassador_core::{Error, Result};
use tokio::fs;

use super::StoreBackend;
use crate::TRACING_TARGET_STORE;

/// Store keeping each key in `<root>/<key>.json`.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            Error::from(e).with_context(format!("creating {}", root.display()))
        })?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            root = %root.display(),
            "Opened file store"
        );

        Ok(Self { root })
    }

    /// Returns the directory holding the values.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');

        if !valid {
            return Err(Error::invalid_input().with_message(format!("invalid store key: {key:?}")));
        }

        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl StoreBackend for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_of(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::from(e).with_context(format!("reading {}", path.display()))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_of(key)?;
        let staging = self.root.join(format!(".{key}.json.tmp"));

        fs::write(&staging, value)
            .await
            .map_err(|e| Error::from(e).with_context(format!("writing {}", staging.display())))?;
        fs::rename(&staging, &path)
            .await
            .map_err(|e| Error::from(e).with_context(format!("replacing {}", path.display())))?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            key,
            size_bytes = value.len(),
            "Stored value"
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_of(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(target: TRACING_TARGET_STORE, key, "Removed value");
                Ok(())
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::from(e).with_context(format!("removing {}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        assert_eq!(store.get("user").await.unwrap(), None);
        store.remove("user").await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store.set("admin-language", "zh").await.unwrap();
        store.set("admin-language", "en").await.unwrap();
        drop(store);

        let reopened = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(
            reopened.get("admin-language").await.unwrap().as_deref(),
            Some("en")
        );

        reopened.remove("admin-language").await.unwrap();
        assert_eq!(reopened.get("admin-language").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("").await.is_err());
        assert!(store.get(".hidden").await.is_err());
    }
}
