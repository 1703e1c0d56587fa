//! Persistence contracts for the domain layer.
//!
//! The bio page is stored as three JSON documents (posts, settings,
//! analytics) in an opaque key-value store. The trait lives here; concrete
//! stores live in `crate::infrastructure::store`.

pub mod kv_store;

pub use kv_store::{KeyValueStore, StorageKey, StoreError, StoreResult};

#[cfg(test)]
pub use kv_store::MockKeyValueStore;
