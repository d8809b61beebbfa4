//! File-backed token storage.
//!
//! Tokens are kept as a flat JSON object (`{"customer_token": "..."}`) and
//! the file is rewritten on every change.

use crate::types::{AppError, Result};
use homehelp_core::TokenStore;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// [`TokenStore`] persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileTokenStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    AppError::Storage(format!("{} is not a token file: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), tokens = entries.len(), "token store opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> homehelp_core::Result<()> {
        let storage_err = |e: std::io::Error| {
            homehelp_core::Error::Storage(format!("{}: {}", self.path.display(), e))
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(storage_err)?;
            }
        }
        let body = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| homehelp_core::Error::Storage(e.to_string()))?;
        fs::write(&self.path, body).map_err(storage_err)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> homehelp_core::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> homehelp_core::Result<()> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> homehelp_core::Result<()> {
        if let Some(old) = self.entries.remove(key) {
            if let Err(e) = self.flush() {
                self.entries.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Handle to one store shared by several session holders.
#[derive(Debug)]
pub struct SharedTokenStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedTokenStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TokenStore> SharedTokenStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }
}

impl<S: TokenStore> TokenStore for SharedTokenStore<S> {
    fn get(&self, key: &str) -> homehelp_core::Result<Option<String>> {
        self.inner.lock().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> homehelp_core::Result<()> {
        self.inner.lock().set(key, value)
    }

    fn remove(&mut self, key: &str) -> homehelp_core::Result<()> {
        self.inner.lock().remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tokens_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tokens.json");

        let mut store = FileTokenStore::open(&path).unwrap();
        store.set("helper_token", "h-1").unwrap();

        let reopened = FileTokenStore::open(&path).unwrap();
        assert_eq!(reopened.get("helper_token").unwrap().as_deref(), Some("h-1"));
    }

    #[test]
    fn test_remove_missing_key_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");

        let mut store = FileTokenStore::open(&path).unwrap();
        store.remove("customer_token").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_shared_handles_see_each_others_writes() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::open(dir.path().join("tokens.json")).unwrap();
        let mut customer = SharedTokenStore::new(store);
        let mut helper = customer.clone();

        customer.set("customer_token", "c").unwrap();
        helper.set("helper_token", "h").unwrap();

        assert_eq!(helper.get("customer_token").unwrap().as_deref(), Some("c"));
        customer.remove("helper_token").unwrap();
        assert!(helper.get("helper_token").unwrap().is_none());
    }

    #[test]
    fn test_failed_remove_keeps_token_in_memory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        let mut store = FileTokenStore::open(&path).unwrap();
        store.set("customer_token", "t1").unwrap();

        // A directory in place of the file makes the rewrite fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(matches!(
            store.remove("customer_token"),
            Err(homehelp_core::Error::Storage(_))
        ));
        assert_eq!(store.get("customer_token").unwrap().as_deref(), Some("t1"));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileTokenStore::open(&path), Err(AppError::Storage(_))));
    }
}
