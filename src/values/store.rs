//! Byte-level value store
//!
//! The seam to whatever storage engine owns the device's values.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;

/// Key-value storage shared by every command class of a device
///
/// All methods use `&self`: implementations provide their own locking so
/// one store can be handed to several command classes at once.
pub trait ValueStore: Send + Sync {
    /// Get the bytes stored under `key`
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;

    /// Remove `key`; returns whether it was present
    fn remove(&self, key: &[u8]) -> Result<bool>;

    /// Number of stored entries
    fn entry_count(&self) -> usize;
}

impl<T: ValueStore + ?Sized> ValueStore for Arc<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &[u8]) -> Result<bool> {
        (**self).remove(key)
    }

    fn entry_count(&self) -> usize {
        (**self).entry_count()
    }
}

/// In-memory store
///
/// BTreeMap wrapped in a RwLock: many concurrent readers, one writer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `entries`
    pub(crate) fn from_map(entries: BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            data: RwLock::new(entries),
        }
    }

    /// Copy of all entries, in key order
    pub(crate) fn snapshot(&self) -> BTreeMap<Vec<u8>, Vec<u8>> {
        self.data.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl ValueStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.data.write().insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &[u8]) -> Result<bool> {
        Ok(self.data.write().remove(key).is_some())
    }

    fn entry_count(&self) -> usize {
        self.data.read().len()
    }
}
