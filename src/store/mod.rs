//! The observable list store.
//!
//! A [`Store`] owns the application state and its listeners, and keeps the
//! code counter and selection counts in session storage.

mod counter;
mod listeners;
mod store;

pub use listeners::Unsubscribe;
pub use store::Store;
