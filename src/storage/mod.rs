//! Session-scoped key/value storage.
//!
//! The store never reaches for a global: it is handed a [`SessionStorage`]
//! at construction. [`MemoryStorage`] works everywhere; on wasm32
//! `WebSessionStorage` wraps the browser's `sessionStorage`.

mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use web::WebSessionStorage;

use std::rc::Rc;
use std::sync::Arc;

use crate::error::StorageError;

/// String key/value storage that lives as long as the user's session.
pub trait SessionStorage {
    /// Value stored under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
