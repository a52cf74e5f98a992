use super::KeyValueStore;
use crate::error::StoreError;

/// Browser `localStorage` backend.
///
/// Holds no JS handles; the storage object is looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Backend("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Backend(format!("localStorage unavailable: {:?}", e)))?
            .ok_or_else(|| StoreError::Backend("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("getItem({}): {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("setItem({}): {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Backend(format!("removeItem({}): {:?}", key, e)))
    }
}
