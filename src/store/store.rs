use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use super::counter::CodeCounter;
use super::listeners::{Listeners, Unsubscribe};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::{Code, Item, ListState};
use crate::storage::{MemoryStorage, SessionStorage};

/// Observable container for a list-shaped application state.
///
/// Every mutation replaces the state with a freshly built value and then
/// notifies listeners in subscription order. The highest code ever assigned
/// and per-item selection counts are kept in the injected
/// [`SessionStorage`], so they survive store reconstruction within a session.
///
/// # Examples
///
/// ```
/// use itemstore::{AppState, Item, MemoryStorage, Store};
///
/// let store = Store::new(AppState::new(vec![Item::new(1, "Milk")]), MemoryStorage::new());
///
/// let code = store.add_item().unwrap();
/// assert_eq!(code, 2);
///
/// store.select_item(code).unwrap();
/// let state = store.get_state().unwrap();
/// assert!(state.list[1].selected);
/// ```
pub struct Store<T, S = MemoryStorage> {
    state: Arc<RwLock<T>>,
    listeners: Arc<Listeners>,
    counter: Arc<CodeCounter<S>>,
    config: Arc<StoreConfig>,
}

impl<T: ListState, S: SessionStorage> Store<T, S> {
    /// Create a store with the default configuration.
    pub fn new(initial: T, storage: S) -> Self {
        Self::build(initial, storage, StoreConfig::default())
    }

    /// Create a store with `config`, rejecting configs that fail
    /// [`StoreConfig::validate`].
    pub fn with_config(initial: T, storage: S, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(initial, storage, config))
    }

    fn build(initial: T, storage: S, config: StoreConfig) -> Self {
        let counter = CodeCounter::new(storage, config.counter_key.clone());
        Self {
            state: Arc::new(RwLock::new(initial)),
            listeners: Arc::new(Listeners::default()),
            counter: Arc::new(counter),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Subscribe to state changes.
    ///
    /// The listener runs after every state replacement. The same closure
    /// logic may be registered more than once; each registration is removed
    /// independently through its own [`Unsubscribe`] handle.
    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.listeners.add(Arc::new(listener));
        debug!("listener {id} subscribed");
        Unsubscribe::new(id, &self.listeners)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Snapshot of the current state.
    ///
    /// Seeds the code counter from the highest code in the list if the
    /// session has none yet.
    pub fn get_state(&self) -> Result<T> {
        self.read(|state| -> Result<T> {
            self.counter.ensure_seeded(state.items())?;
            Ok(state.clone())
        })
    }

    /// Read state without cloning it and without touching storage.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&*state)
    }

    /// Replace the state and notify listeners.
    ///
    /// The counter is raised to the new list's highest code; it is never
    /// lowered. A panicking listener yields [`StoreError::ListenerPanicked`]
    /// after the state has been replaced and all listeners have run.
    pub fn set_state(&self, new_state: T) -> Result<()> {
        self.commit(|_| Ok((new_state, ())))
    }

    /// Apply `f` to a copy of the state and install the result.
    ///
    /// `f` runs while the state is locked and must not call back into the
    /// store.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        self.commit(|state| {
            let mut next = state.clone();
            f(&mut next);
            Ok((next, ()))
        })
    }

    /// Append a "New entry" item with the next free code and return that code.
    pub fn add_item(&self) -> Result<Code> {
        self.commit(|state| {
            let code = self.counter.next_code(state.items())?;
            let mut items = state.items().to_vec();
            items.push(Item::new(code, self.config.new_item_title()));
            debug!("adding item {code}");
            Ok((state.with_items(items), code))
        })
    }

    /// Remove every item with `code`. Listeners are notified even when
    /// nothing matched.
    pub fn delete_item(&self, code: Code) -> Result<()> {
        self.commit(|state| {
            let items = state
                .items()
                .iter()
                .filter(|item| item.code != code)
                .cloned()
                .collect();
            debug!("deleting item {code}");
            Ok((state.with_items(items), ()))
        })
    }

    /// Toggle selection of `code` and bump its selection count.
    ///
    /// At most one item stays selected: every other selected item is
    /// deselected.
    pub fn select_item(&self, code: Code) -> Result<()> {
        self.commit(|state| {
            let count = self.counter.bump_selection(code)?;
            let items = state
                .items()
                .iter()
                .map(|item| {
                    if item.code == code {
                        item.toggled(count)
                    } else if item.selected {
                        item.with_selected(false)
                    } else {
                        item.clone()
                    }
                })
                .collect();
            debug!("item {code} selected {count} time(s)");
            Ok((state.with_items(items), ()))
        })
    }

    /// Counter value as currently stored, without seeding it.
    pub fn current_code(&self) -> Option<Code> {
        self.counter.current()
    }

    /// How many times `code` has been selected this session.
    pub fn selection_count(&self, code: Code) -> u32 {
        self.counter.selection_count(code)
    }

    /// Derive the next state from the current one and install it while
    /// holding the write lock, so concurrent mutations cannot interleave.
    /// Listeners run after the lock is released.
    fn commit<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&T) -> Result<(T, R)>,
    {
        let out = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            self.counter.ensure_seeded(state.items())?;
            let (next, out) = f(&*state)?;
            self.counter.raise_to(next.items())?;
            *state = next;
            out
        };
        self.notify()?;
        Ok(out)
    }

    fn notify(&self) -> Result<()> {
        let failures = self.listeners.notify();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(StoreError::ListenerPanicked(failures))
        }
    }
}

impl<T, S> Clone for Store<T, S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            listeners: Arc::clone(&self.listeners),
            counter: Arc::clone(&self.counter),
            config: Arc::clone(&self.config),
        }
    }
}
