use std::sync::atomic::{AtomicI64, Ordering};

use log::{debug, warn};

use crate::error::{Result, StoreError};
use crate::model::{max_code, Code, Item};
use crate::storage::SessionStorage;

/// Session-persisted counters: the highest code ever handed out, and how
/// often each item has been selected.
pub(crate) struct CodeCounter<S> {
    storage: S,
    key: String,
    // Highest counter value this process has read or written.
    high_water: AtomicI64,
}

impl<S: SessionStorage> CodeCounter<S> {
    pub(crate) fn new(storage: S, key: String) -> Self {
        Self {
            storage,
            key,
            high_water: AtomicI64::new(Code::MIN),
        }
    }

    /// Stored counter value. Missing and unparsable values both read as
    /// `None`; the latter is logged.
    ///
    /// A counter that reads as `None` is reseeded by the next write, never
    /// below the highest value this counter has already seen. A value lost
    /// before this process ever read it (corrupted by another writer, or a
    /// failed browser read) falls back to the highest code in the list.
    pub(crate) fn current(&self) -> Option<Code> {
        let raw = self.storage.get(&self.key)?;
        match raw.trim().parse::<Code>() {
            Ok(value) => {
                self.high_water.fetch_max(value, Ordering::SeqCst);
                Some(value)
            }
            Err(_) => {
                warn!("ignoring malformed code counter {:?} under key `{}`", raw, self.key);
                None
            }
        }
    }

    fn store(&self, value: Code) -> Result<Code> {
        let value = value.max(self.high_water.load(Ordering::SeqCst));
        self.storage.set(&self.key, &value.to_string())?;
        self.high_water.fetch_max(value, Ordering::SeqCst);
        Ok(value)
    }

    /// Make sure a counter exists, seeding it with the highest code in
    /// `items` (0 for an empty list) when it does not.
    pub(crate) fn ensure_seeded(&self, items: &[Item]) -> Result<Code> {
        if let Some(value) = self.current() {
            return Ok(value);
        }
        let seed = self.store(max_code(items).unwrap_or(0))?;
        debug!("seeded code counter `{}` with {}", self.key, seed);
        Ok(seed)
    }

    /// Raise the counter to the highest code in `items`. Never lowers it.
    pub(crate) fn raise_to(&self, items: &[Item]) -> Result<()> {
        let Some(max) = max_code(items) else {
            return Ok(());
        };
        match self.current() {
            Some(value) if value >= max => Ok(()),
            _ => {
                let value = self.store(max)?;
                debug!("raised code counter `{}` to {}", self.key, value);
                Ok(())
            }
        }
    }

    /// Code for the next new item.
    pub(crate) fn next_code(&self, items: &[Item]) -> Result<Code> {
        let value = self.ensure_seeded(items)?;
        value
            .checked_add(1)
            .ok_or(StoreError::CounterOverflow(value))
    }

    pub(crate) fn selection_count(&self, code: Code) -> u32 {
        let key = code.to_string();
        let Some(raw) = self.storage.get(&key) else {
            return 0;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring malformed selection count {:?} for item {}", raw, code);
            0
        })
    }

    /// Increment the selection count of `code` and return the new value.
    pub(crate) fn bump_selection(&self, code: Code) -> Result<u32> {
        let count = self.selection_count(code).saturating_add(1);
        self.storage.set(&code.to_string(), &count.to_string())?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn counter() -> (CodeCounter<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (CodeCounter::new(storage.clone(), "code".into()), storage)
    }

    #[test]
    fn seeds_from_max_not_last() {
        let (counter, storage) = counter();
        let items = vec![Item::new(9, "a"), Item::new(2, "b")];

        assert_eq!(counter.ensure_seeded(&items).unwrap(), 9);
        assert_eq!(storage.get("code").as_deref(), Some("9"));
    }

    #[test]
    fn empty_list_seeds_zero() {
        let (counter, _) = counter();
        assert_eq!(counter.next_code(&[]).unwrap(), 1);
    }

    #[test]
    fn malformed_counter_is_reseeded() {
        let (counter, storage) = counter();
        storage.set("code", "NaN").unwrap();

        assert_eq!(counter.current(), None);
        assert_eq!(counter.next_code(&[Item::new(4, "x")]).unwrap(), 5);
        assert_eq!(storage.get("code").as_deref(), Some("4"));
    }

    #[test]
    fn corrupted_counter_does_not_fall_below_seen_value() {
        let (counter, storage) = counter();
        storage.set("code", "10").unwrap();
        let items = vec![Item::new(1, "x")];

        assert_eq!(counter.current(), Some(10));
        storage.set("code", "garbage").unwrap();

        assert_eq!(counter.next_code(&items).unwrap(), 11);
        assert_eq!(storage.get("code").as_deref(), Some("10"));
    }

    #[test]
    fn raise_never_lowers() {
        let (counter, storage) = counter();
        storage.set("code", "10").unwrap();

        counter.raise_to(&[Item::new(3, "x")]).unwrap();
        assert_eq!(counter.current(), Some(10));

        counter.raise_to(&[Item::new(11, "x")]).unwrap();
        assert_eq!(counter.current(), Some(11));
    }

    #[test]
    fn overflow_is_reported() {
        let (counter, storage) = counter();
        storage.set("code", &Code::MAX.to_string()).unwrap();

        assert!(matches!(
            counter.next_code(&[]),
            Err(StoreError::CounterOverflow(Code::MAX))
        ));
    }

    #[test]
    fn selection_counts_per_code() {
        let (counter, storage) = counter();

        assert_eq!(counter.bump_selection(1).unwrap(), 1);
        assert_eq!(counter.bump_selection(1).unwrap(), 2);
        assert_eq!(counter.bump_selection(2).unwrap(), 1);
        assert_eq!(storage.get("1").as_deref(), Some("2"));
        assert_eq!(counter.selection_count(3), 0);
    }
}
