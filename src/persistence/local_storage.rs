//! Browser LocalStorage backend

use super::KeyValueStore;
use crate::error::GameError;

/// LocalStorage handle; reads come back empty when storage is blocked
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - scores and settings won't persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        let storage = self.storage.as_ref().ok_or(GameError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| GameError::StorageWrite {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
