//! Error types for store operations.

use thiserror::Error;

use crate::model::Code;

/// Convenience alias used throughout the crate.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Errors raised by a [`SessionStorage`](crate::storage::SessionStorage) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The backing storage is not reachable (no window, storage disabled).
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    /// A write was rejected, usually because the quota is exhausted.
    #[error("failed to write key `{key}`: {reason}")]
    Write {
        /// Key being written.
        key: String,
        /// Backend-provided reason.
        reason: String,
    },
}

/// A single listener that panicked while being notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Registration id of the listener.
    pub listener: u64,
    /// Panic payload rendered as text.
    pub message: String,
}

/// Errors that can occur while operating a [`Store`](crate::Store).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Storage read/write failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// One or more listeners panicked. The state change itself was committed
    /// and every other listener was still notified.
    #[error("{} listener(s) panicked during notification", .0.len())]
    ListenerPanicked(Vec<ListenerFailure>),

    /// The code counter cannot be advanced any further.
    #[error("code counter overflowed after {0}")]
    CounterOverflow(Code),

    /// Configuration values that cannot be used.
    #[error("invalid store config: {0}")]
    InvalidConfig(String),

    /// State or config JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Listener failures carried by this error, if any.
    #[must_use]
    pub fn listener_failures(&self) -> &[ListenerFailure] {
        match self {
            Self::ListenerPanicked(failures) => failures,
            _ => &[],
        }
    }
}
