use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use log::{debug, warn};

use crate::error::ListenerFailure;

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Ordered listener registry.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    entries: RwLock<Vec<(u64, Listener)>>,
}

impl Listeners {
    pub(crate) fn add(&self, listener: Listener) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Returns whether a listener was actually removed.
    pub(crate) fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(entry, _)| *entry != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Call every listener registered at the time of the call, in
    /// subscription order. A panicking listener does not stop the others.
    pub(crate) fn notify(&self) -> Vec<ListenerFailure> {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<(u64, Listener)> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut failures = Vec::new();
        for (id, listener) in snapshot {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| listener())) {
                let message = panic_message(payload.as_ref());
                warn!("listener {id} panicked: {message}");
                failures.push(ListenerFailure {
                    listener: id,
                    message,
                });
            }
        }
        failures
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Dropping the handle keeps the listener registered; call
/// [`unsubscribe`](Unsubscribe::unsubscribe) to remove it.
#[derive(Clone, Debug)]
pub struct Unsubscribe {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Unsubscribe {
    pub(crate) fn new(id: u64, listeners: &Arc<Listeners>) -> Self {
        Self {
            id,
            listeners: Arc::downgrade(listeners),
        }
    }

    /// Registration id, matching [`ListenerFailure::listener`].
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the listener. Later calls, or calls after the store is gone,
    /// do nothing.
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if listeners.remove(self.id) {
                debug!("listener {} unsubscribed", self.id);
            }
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn panics_are_collected_and_others_still_run() {
        let listeners = Listeners::default();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let c = calls.clone();
        listeners.add(Arc::new(move || c.lock().unwrap().push("first")));
        let failing = listeners.add(Arc::new(|| panic!("boom")));
        let c = calls.clone();
        listeners.add(Arc::new(move || c.lock().unwrap().push("third")));

        let failures = listeners.notify();

        assert_eq!(*calls.lock().unwrap(), vec!["first", "third"]);
        assert_eq!(
            failures,
            vec![ListenerFailure {
                listener: failing,
                message: "boom".to_string(),
            }]
        );
    }

    #[test]
    fn unsubscribe_outlives_registry() {
        let listeners = Arc::new(Listeners::default());
        let id = listeners.add(Arc::new(|| {}));
        let handle = Unsubscribe::new(id, &listeners);
        let weak = Arc::downgrade(&listeners);

        drop(listeners);
        assert!(weak.upgrade().is_none());

        handle.unsubscribe();
        handle.unsubscribe();
        assert_eq!(handle.id(), id);
    }

    #[test]
    fn unsubscribe_removes_only_its_registration() {
        let listeners = Arc::new(Listeners::default());
        let first = Unsubscribe::new(listeners.add(Arc::new(|| {})), &listeners);
        let second = Unsubscribe::new(listeners.add(Arc::new(|| {})), &listeners);

        first.unsubscribe();
        assert_eq!(listeners.len(), 1);
        first.unsubscribe();
        assert_eq!(listeners.len(), 1);

        second.unsubscribe();
        assert_eq!(listeners.len(), 0);
    }
}
