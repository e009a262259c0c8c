//! State shapes held by the store.
//!
//! A store owns any value implementing [`ListState`]; [`AppState`] is the
//! default shape, a list of [`Item`]s plus whatever other fields the
//! application keeps alongside it.

mod item;
mod state;

pub use item::{max_code, Code, Item};
pub use state::{AppState, ListState};
