//! Feedline key-value persistence
//!
//! The only persistence primitive in the app: whole values read and written
//! by key, serialized as JSON text. Backends:
//! - [`InMemoryStore`] for a single process (tests, ephemeral sessions)
//! - [`JsonFileStore`] for durable storage in one JSON document on disk
//!
//! There is no per-record update. Callers load a whole value, change it and
//! save it back; the last write wins.

mod error;
mod file;
mod keys;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use keys::StoreKey;
pub use memory::InMemoryStore;

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Store handle shared by every component of one process
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Raw store operations over serialized JSON text
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Get the raw JSON text stored under `key`
    fn get_raw(&self, key: StoreKey) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set_raw(&self, key: StoreKey, value: String) -> StoreResult<()>;

    /// Remove `key` entirely
    fn remove(&self, key: StoreKey) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_raw(&self, key: StoreKey) -> StoreResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: StoreKey, value: String) -> StoreResult<()> {
        (**self).set_raw(key, value)
    }

    fn remove(&self, key: StoreKey) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Typed access on top of [`KeyValueStore`]
pub trait StoreExt: KeyValueStore {
    /// Load and deserialize the value under `key`.
    ///
    /// A value that no longer deserializes is a [`StoreError::Serialization`]
    /// and stays in place. Callers must not treat it as absent, or their next
    /// save would replace it.
    fn load<T: DeserializeOwned>(&self, key: StoreKey) -> StoreResult<Option<T>> {
        let Some(raw) = self.get_raw(key)? else {
            debug!(key = %key, "Store miss");
            return Ok(None);
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(key = %key, bytes = raw.len(), "Store hit");
                Ok(Some(value))
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Stored value failed to deserialize");
                Err(StoreError::Serialization(e))
            }
        }
    }

    /// Serialize `value` and write it under `key`
    fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> StoreResult<()> {
        let data = serde_json::to_string(value)?;
        debug!(key = %key, bytes = data.len(), "Store write");
        self.set_raw(key, data)
    }

    /// Remove the value under `key`
    fn clear(&self, key: StoreKey) -> StoreResult<()> {
        debug!(key = %key, "Store remove");
        self.remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}
