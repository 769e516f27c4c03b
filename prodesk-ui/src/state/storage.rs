//! Browser Storage
//!
//! `localStorage` rendition of the widget's key-value store. Writes fail
//! softly when storage is disabled (private browsing, sandboxed iframes).

use prodesk::widget::{KeyValueStore, StoreError};

/// Lead flags persisted in `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))?;

        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
