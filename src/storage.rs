//! Key-Value Storage
//!
//! String-keyed slots backing the collection. The browser's localStorage in
//! the app, an in-memory map when that is unavailable and in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// Minimal synchronous key-value contract, the subset of Web Storage we use
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        // Err when access is denied (e.g. storage disabled), Ok(None) when absent
        let inner = window
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // QuotaExceededError lands here
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// In-memory storage. Clones share the same slots.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, as a full quota would
    #[cfg(test)]
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.fail_writes.borrow() {
            return Err(StorageError::Write("quota exceeded".to_string()));
        }
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage picked at start-up
#[derive(Clone, Debug)]
pub enum AppStorage {
    Browser(BrowserStorage),
    Memory(MemoryStorage),
}

impl AppStorage {
    /// localStorage if the page can reach it, otherwise a session-only map
    pub fn detect() -> Self {
        match BrowserStorage::open() {
            Ok(browser) => AppStorage::Browser(browser),
            Err(e) => {
                log::warn!("{}; collection will not survive a reload", e);
                AppStorage::Memory(MemoryStorage::new())
            }
        }
    }
}

impl KeyValueStorage for AppStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            AppStorage::Browser(s) => s.get_item(key),
            AppStorage::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            AppStorage::Browser(s) => s.set_item(key, value),
            AppStorage::Memory(s) => s.set_item(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_shared_between_clones() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set_item("k", "v").unwrap();
        assert_eq!(b.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(b.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_failing_writes() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "old").unwrap();
        storage.set_fail_writes(true);
        assert!(matches!(storage.set_item("k", "new"), Err(StorageError::Write(_))));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn test_app_storage_dispatch() {
        let memory = MemoryStorage::new();
        let storage = AppStorage::Memory(memory.clone());
        storage.set_item("k", "v").unwrap();
        assert_eq!(memory.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
