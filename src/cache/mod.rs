//! Persistent cache for the product list and favorites
//!
//! This module wraps a key-value storage backend (browser `localStorage` on
//! wasm, an in-memory map elsewhere) and stores the product list snapshot with
//! its capture timestamp, plus the TTL-less favorites list. Every operation
//! degrades to a no-op when the backend turns out to be unavailable.

mod manager;
mod storage;

pub use manager::CacheManager;
#[cfg(test)]
pub(crate) use manager::now_ms;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
