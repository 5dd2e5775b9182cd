use alloc::sync::Arc;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::StorageError;

/// A string key-value store that holds persisted width maps.
///
/// This mirrors the shape of browser `localStorage`: values are opaque strings, and every
/// call may fail. Implementations should not retry; the caller decides what a failure means.
pub trait WidthStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: WidthStore + ?Sized> WidthStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

/// An in-memory [`WidthStore`].
///
/// Clones share the same entries, so a host (or a test) can keep a handle and inspect what
/// the controller wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a raw value into the store, bypassing failure simulation.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.entries.insert(key.into(), value.into());
        }
    }

    /// Reads a raw value, bypassing failure simulation.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.entries.get(key).cloned())
    }

    /// Makes every subsequent `set` fail with [`StorageError::QuotaExceeded`].
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_writes = fail;
        }
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryStoreInner>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_owned()))
    }
}

impl WidthStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
            });
        }
        inner.entries.insert(key.to_owned(), value.to_owned());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.entries.remove(key);
        Ok(())
    }
}
