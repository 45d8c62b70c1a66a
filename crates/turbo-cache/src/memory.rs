//! In-process store backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{CacheError, Store};

/// In-memory key-value store.
///
/// Clones are handles onto the same map, so a value written through one
/// handle is visible through every other. This is how a page reload is
/// modeled: a fresh consumer opens a new handle onto the same storage.
///
/// An optional quota caps the total number of bytes held across all keys.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes past `bytes` total.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Rc::default(),
            quota: Some(bytes),
        }
    }

    /// Total bytes currently held.
    pub fn used_bytes(&self) -> usize {
        self.entries.borrow().values().map(Vec::len).sum()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self.entries.borrow_mut();
        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let requested = others + value.len();
            if requested > limit {
                return Err(CacheError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    limit,
                });
            }
        }
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.borrow().contains_key(key))
    }
}
