//! Process-local store backend

use crate::{KeyValueStore, StoreKey, StoreResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory key-value store.
///
/// Clones share the same map, so two handles behave like two execution
/// contexts looking at one storage area.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<StoreKey, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently holding a value
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_raw(&self, key: StoreKey) -> StoreResult<Option<String>> {
        Ok(self.entries.read().get(&key).cloned())
    }

    fn set_raw(&self, key: StoreKey, value: String) -> StoreResult<()> {
        self.entries.write().insert(key, value);
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> StoreResult<()> {
        self.entries.write().remove(&key);
        Ok(())
    }
}
