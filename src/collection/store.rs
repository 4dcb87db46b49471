//! Collection Store
//!
//! Whole collection stored as one JSON array under a single key. Every
//! operation is a full read-modify-write; there is no locking, so two tabs
//! writing at once can lose each other's changes.

use crate::error::StorageError;
use crate::models::CollectionEntry;
use crate::storage::KeyValueStorage;

#[derive(Clone, Debug)]
pub struct CollectionStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CollectionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    /// Stored collection in order. Missing or unreadable data reads as empty.
    pub fn read_all(&self) -> Vec<CollectionEntry> {
        match self.try_read_all() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{}; treating collection as empty", e);
                Vec::new()
            }
        }
    }

    fn try_read_all(&self) -> Result<Vec<CollectionEntry>, StorageError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| StorageError::Parse(e.to_string()))
    }

    /// Replace the stored collection. A failed write is logged and dropped;
    /// callers keep whatever they hold in memory.
    pub fn write_all(&self, entries: &[CollectionEntry]) {
        if let Err(e) = self.try_write_all(entries) {
            log::error!("{}; collection changes may be lost on reload", e);
        }
    }

    fn try_write_all(&self, entries: &[CollectionEntry]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries).map_err(|e| StorageError::Write(e.to_string()))?;
        self.storage.set_item(&self.key, &raw)
    }

    /// Append `entry` unless an entry with its id is already stored.
    pub fn add(&self, entry: &CollectionEntry) {
        let mut entries = self.read_all();
        if entries.iter().any(|e| e.id == entry.id) {
            return;
        }
        entries.push(entry.clone());
        self.write_all(&entries);
    }

    pub fn remove(&self, id: u32) {
        let mut entries = self.read_all();
        entries.retain(|e| e.id != id);
        self.write_all(&entries);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.read_all().iter().any(|e| e.id == id)
    }
}
