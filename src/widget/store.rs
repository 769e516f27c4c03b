//! Widget Key-Value Store
//!
//! The only state the widget keeps across page loads is the per-API-key
//! "lead already captured" flag. It lives behind [`KeyValueStore`] so the
//! browser can back it with `localStorage`, the terminal with a JSON file and
//! tests with a plain map.
//!
//! Reads and writes are not atomic with respect to each other; two widgets
//! sharing a store can both show the prompt.

use std::collections::HashMap;
use thiserror::Error;

/// Value written when a lead has been captured
pub const LEAD_FLAG_VALUE: &str = "true";

/// Minimal string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Errors from a store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend-specific failure (quota exceeded, storage disabled, ...)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Storage key of the lead flag for one tenant
pub fn lead_flag_key(api_key: &str) -> String {
    format!("lead_{}", api_key)
}

/// Whether a lead was already captured for `api_key` in this store
pub fn lead_captured<S: KeyValueStore + ?Sized>(store: &S, api_key: &str) -> bool {
    store
        .get(&lead_flag_key(api_key))
        .is_some_and(|value| !value.is_empty())
}

/// Record that a lead was captured for `api_key`
pub fn mark_lead_captured<S: KeyValueStore + ?Sized>(
    store: &mut S,
    api_key: &str,
) -> Result<(), StoreError> {
    store.set(&lead_flag_key(api_key), LEAD_FLAG_VALUE)
}

/// In-process store; contents vanish with the value
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use super::{KeyValueStore, StoreError};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    /// JSON object on disk, rewritten on every `set`
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        entries: HashMap<String, String>,
    }

    impl FileStore {
        /// Open the store at `path`, starting empty if the file does not exist
        pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
            let path = path.as_ref().to_path_buf();

            let entries = if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                if content.trim().is_empty() {
                    HashMap::new()
                } else {
                    serde_json::from_str(&content)?
                }
            } else {
                HashMap::new()
            };

            tracing::debug!(path = ?path, entries = entries.len(), "Opened widget store");
            Ok(Self { path, entries })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn persist(&self) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let content = serde_json::to_string_pretty(&self.entries)?;
            std::fs::write(&self.path, content)?;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries.insert(key.to_string(), value.to_string());
            self.persist()
        }
    }
}
