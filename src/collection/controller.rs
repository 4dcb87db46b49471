//! Collection Controller
//!
//! In-memory mirror of the stored collection backing the collection view.
//! Every mutation rewrites the whole stored sequence. If that write fails the
//! in-memory state is kept anyway.

use crate::models::CollectionEntry;
use crate::storage::KeyValueStorage;

use super::CollectionStore;

pub struct CollectionController<S> {
    store: CollectionStore<S>,
    entries: Vec<CollectionEntry>,
    initialized: bool,
}

impl<S: KeyValueStorage> CollectionController<S> {
    pub fn new(store: CollectionStore<S>) -> Self {
        Self { store, entries: Vec::new(), initialized: false }
    }

    /// Load from the store. Only the first call reads; the mirror is
    /// authoritative after that.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.entries = self.store.read_all();
        self.initialized = true;
        log::debug!("loaded {} collection entries", self.entries.len());
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the entry at `from` so it ends up at `to`. Out-of-range indices
    /// leave the collection untouched.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from >= self.entries.len() || to >= self.entries.len() {
            log::warn!("ignoring reorder {} -> {} of {} entries", from, to, self.entries.len());
            return;
        }
        let moved = self.entries.remove(from);
        self.entries.insert(to, moved);
        self.persist();
    }

    pub fn remove_by_id(&mut self, id: u32) {
        self.entries.retain(|e| e.id != id);
        self.persist();
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        self.store.write_all(&self.entries);
    }
}
