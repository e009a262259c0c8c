use wasm_bindgen::JsValue;

use super::SessionStorage;
use crate::error::StorageError;

/// The browser's `window.sessionStorage`.
pub struct WebSessionStorage {
    inner: web_sys::Storage,
}

impl WebSessionStorage {
    /// Open the session storage of the current window.
    pub fn new() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no global window".to_string()))?;
        let inner = window
            .session_storage()
            .map_err(|e| StorageError::Unavailable(describe(&e)))?
            .ok_or_else(|| StorageError::Unavailable("sessionStorage is disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl SessionStorage for WebSessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.inner.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("sessionStorage read of `{key}` failed: {}", describe(&e));
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: describe(&e),
            })
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
