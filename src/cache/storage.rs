//! Key-value storage backends
//!
//! [`KeyValueStore`] is the seam between the cache manager and whatever
//! actually holds the bytes. Values are opaque serialized text.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend does not exist in this environment
    #[error("storage backend is unavailable")]
    Unavailable,

    /// The backend refused a read
    #[error("storage read denied: {0}")]
    ReadDenied(String),

    /// The backend refused a write or delete
    #[error("storage write denied: {0}")]
    WriteDenied(String),
}

/// A string-to-string store with fallible access
///
/// Methods take `&self`; backends use interior mutability the way the
/// browser `Storage` object does.
pub trait KeyValueStore {
    /// Reads the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes the value stored under `key`
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store
///
/// Clones share the same underlying map, so a caller can keep a handle to
/// inspect what the cache wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser `localStorage`
///
/// Holds `None` when the page has no accessible storage (privacy mode,
/// sandboxed iframe); every call then fails with [`StorageError::Unavailable`].
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Opens the window's `localStorage`
    pub fn open(window: &web_sys::Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(error) => {
                tracing::warn!(
                    error = %crate::dom::js_value_message(error, "access denied"),
                    "localStorage access denied"
                );
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|error| {
            StorageError::ReadDenied(crate::dom::js_value_message(error, "getItem failed"))
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|error| {
            StorageError::WriteDenied(crate::dom::js_value_message(error, "setItem failed"))
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|error| {
            StorageError::WriteDenied(crate::dom::js_value_message(error, "removeItem failed"))
        })
    }
}
