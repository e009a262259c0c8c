//! # Itemstore
//!
//! An observable state container for list-based UIs.
//!
//! A [`Store`] holds the application state and notifies subscribers after
//! every change. Alongside the state it keeps two kinds of session-scoped
//! counters in an injected [`SessionStorage`]:
//! - the highest item code ever assigned, used to mint codes for new items
//! - how many times each item has been selected
//!
//! Display text derived from those counts (" | Selected 3 times") lives in
//! [`labels`], outside the store.

pub mod config;
pub mod error;
pub mod labels;
pub mod model;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use config::StoreConfig;
pub use error::{ListenerFailure, Result, StorageError, StoreError};
pub use labels::Locale;
pub use model::{AppState, Code, Item, ListState};
pub use storage::{MemoryStorage, SessionStorage};
#[cfg(target_arch = "wasm32")]
pub use storage::WebSessionStorage;
pub use store::{Store, Unsubscribe};
