//! Durable key-value storage layer for TurboAisle.
//!
//! Provides a small [`Store`] abstraction over raw byte values plus a typed
//! [`Cache`] wrapper with automatic JSON serialization.
//!
//! Two backends ship with the crate:
//!
//! - [`MemoryStore`] - shared in-process map, optionally capped by a byte quota
//! - [`FileStore`] - one file per key under a directory, written atomically
//!
//! # Example
//!
//! ```rust
//! use turbo_cache::{cache_key, Cache, MemoryStore};
//! use std::collections::BTreeMap;
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = cache_key!("aisle", "cart");
//!
//! let mut cart = BTreeMap::new();
//! cart.insert("a".to_string(), 1);
//! cache.set(&key, &cart).unwrap();
//!
//! let loaded: Option<BTreeMap<String, i64>> = cache.get(&key).unwrap();
//! assert_eq!(loaded, Some(cart));
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, Store};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store};
}
