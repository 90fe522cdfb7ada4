//! JSON file store backend
//!
//! The whole key space is kept in one JSON object on disk, each entry holding
//! the serialized text of one value. Every operation reads the file afresh,
//! and a write merges only its own key into the current document before
//! rewriting it, so handles on one path never clobber each other's keys.

use crate::{KeyValueStore, StoreKey, StoreResult};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-merge-write cycles issued through this handle
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        let entries = store.read_document()?;
        info!(path = %store.path.display(), keys = entries.len(), "Opened JSON file store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents of the file; a missing file is an empty document
    fn read_document(&self) -> StoreResult<HashMap<StoreKey, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Self::decode(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn decode(contents: &str) -> StoreResult<HashMap<StoreKey, String>> {
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let document: BTreeMap<String, String> = serde_json::from_str(contents)?;
        let mut entries = HashMap::with_capacity(document.len());
        for (name, value) in document {
            match StoreKey::parse(&name) {
                Some(key) => {
                    entries.insert(key, value);
                }
                None => warn!(key = %name, "Ignoring unknown key in store file"),
            }
        }
        Ok(entries)
    }

    /// Re-read the file, apply `value` to `key` alone and write it back
    fn merge(&self, key: StoreKey, value: Option<String>) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.read_document()?;

        let changed = match value {
            Some(value) => entries.insert(key, value.clone()).as_ref() != Some(&value),
            None => entries.remove(&key).is_some(),
        };
        if !changed {
            return Ok(());
        }
        self.persist(&entries)
    }

    fn persist(&self, entries: &HashMap<StoreKey, String>) -> StoreResult<()> {
        let document: BTreeMap<&str, &String> =
            entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        let data = serde_json::to_string_pretty(&document)?;

        // Write next to the target and rename so readers never see a torn file
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), keys = entries.len(), "Store file written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: StoreKey) -> StoreResult<Option<String>> {
        Ok(self.read_document()?.remove(&key))
    }

    fn set_raw(&self, key: StoreKey, value: String) -> StoreResult<()> {
        self.merge(key, Some(value))
    }

    fn remove(&self, key: StoreKey) -> StoreResult<()> {
        self.merge(key, None)
    }
}
