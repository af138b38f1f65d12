//! Cache manager for the product list and favorites
//!
//! Provides a `CacheManager` that stores serializable data as JSON text in a
//! [`KeyValueStore`], together with a capture timestamp for the product list.
//! Failures never surface to the caller: reads return `None`, writes are
//! logged and dropped.

use std::cell::Cell;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::storage::KeyValueStore;
use crate::config::{CarouselConfig, StorageKeys};
use crate::data::{FavoriteSet, Product};

/// Throwaway key written and deleted to check the backend
const PROBE_KEY: &str = "__localStorage_test__";

/// Current wall-clock time in epoch milliseconds
pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Manages reading and writing cached data to a key-value store
///
/// Availability is checked once, on first use, with a write/delete of a
/// throwaway key. A failed check turns every later operation into a no-op for
/// the lifetime of the manager.
#[derive(Debug)]
pub struct CacheManager<S> {
    /// Backend holding the serialized entries
    store: S,
    /// Keys of the three storage namespaces
    keys: StorageKeys,
    /// Freshness window for the product list, in milliseconds
    ttl_ms: i64,
    /// Result of the availability check, once run
    available: Cell<Option<bool>>,
}

impl<S: KeyValueStore> CacheManager<S> {
    /// Creates a cache manager over `store` using the keys and TTL from `config`
    pub fn new(store: S, config: &CarouselConfig) -> Self {
        Self {
            store,
            keys: config.storage_keys.clone(),
            ttl_ms: config.cache_ttl_ms(),
            available: Cell::new(None),
        }
    }

    /// Whether the storage backend accepts writes
    pub fn is_available(&self) -> bool {
        if let Some(available) = self.available.get() {
            return available;
        }

        let available = self.check_backend();
        self.available.set(Some(available));
        available
    }

    fn check_backend(&self) -> bool {
        let result = self
            .store
            .set_item(PROBE_KEY, PROBE_KEY)
            .and_then(|()| self.store.remove_item(PROBE_KEY));

        match result {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "Storage unavailable, caching disabled");
                false
            }
        }
    }

    /// Reads and parses a JSON value, treating corrupt entries as absent
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.is_available() {
            return None;
        }

        let raw = match self.store.get_item(key) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(key, %error, "Storage read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                debug!(key, %error, "Discarding unparsable cache entry");
                None
            }
        }
    }

    /// Serializes and stores a JSON value, returning whether it was written
    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        if !self.is_available() {
            return false;
        }

        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(error) => {
                warn!(key, %error, "Failed to serialize cache entry");
                return false;
            }
        };

        match self.store.set_item(key, &json) {
            Ok(()) => true,
            Err(error) => {
                warn!(key, %error, "Storage access denied, cannot cache data");
                false
            }
        }
    }

    /// Returns the last cached product list, if present and parsable
    pub fn product_list(&self) -> Option<Vec<Product>> {
        self.read_json(&self.keys.products)
    }

    /// Stores the product list stamped with the current time
    pub fn set_product_list(&self, products: &[Product]) {
        self.set_product_list_at(products, now_ms());
    }

    /// Stores the product list stamped with `captured_at_ms`
    ///
    /// The timestamp is only written after the list itself, so a failed list
    /// write never leaves a fresh timestamp pointing at old data.
    pub fn set_product_list_at(&self, products: &[Product], captured_at_ms: i64) {
        if !self.write_json(&self.keys.products, products) {
            return;
        }

        if let Err(error) = self
            .store
            .set_item(&self.keys.timestamp, &captured_at_ms.to_string())
        {
            warn!(%error, "Storage access denied, cannot record cache timestamp");
        }
    }

    /// Capture time of the cached product list in epoch milliseconds
    pub fn cached_at(&self) -> Option<i64> {
        if !self.is_available() {
            return None;
        }

        let raw = match self.store.get_item(&self.keys.timestamp) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(key = %self.keys.timestamp, %error, "Storage read failed");
                return None;
            }
        };
        raw.trim().parse().ok()
    }

    /// Whether the cached product list is younger than the TTL
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(now_ms())
    }

    /// Whether the cached product list is younger than the TTL at `now_ms`
    pub fn is_fresh_at(&self, now_ms: i64) -> bool {
        self.cached_at()
            .is_some_and(|cached_at| now_ms.saturating_sub(cached_at) < self.ttl_ms)
    }

    /// Returns the persisted favorites, or an empty set
    pub fn favorites(&self) -> FavoriteSet {
        self.read_json(&self.keys.favorites).unwrap_or_default()
    }

    /// Persists the favorites; they never expire
    pub fn set_favorites(&self, favorites: &FavoriteSet) {
        self.write_json(&self.keys.favorites, favorites);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::cache::{MemoryStore, StorageError};
    use crate::data::ProductId;

    /// Store whose every access throws, like `localStorage` in a sandboxed frame
    #[derive(Debug, Default)]
    struct DeniedStore {
        write_attempts: Cell<usize>,
    }

    impl KeyValueStore for DeniedStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::ReadDenied("SecurityError".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            self.write_attempts.set(self.write_attempts.get() + 1);
            Err(StorageError::WriteDenied("SecurityError".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteDenied("SecurityError".to_string()))
        }
    }

    /// Store that accepts writes but fails every read
    #[derive(Debug, Default)]
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::ReadDenied("SecurityError".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Ok(mut inner) = self.0.lock() {
                inner.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sample_products() -> Vec<Product> {
        vec![
            Product::new(1, "Chicco", "Biberon 150 ml", 200.0, 150.0),
            Product::new(2, "Prima", "Bebek Bezi 4 Numara", 499.9, 499.9),
        ]
    }

    fn create_test_cache() -> (CacheManager<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let cache = CacheManager::new(store.clone(), &CarouselConfig::default());
        (cache, store)
    }

    #[test]
    fn test_is_available_with_memory_store() {
        let (cache, store) = create_test_cache();
        assert!(cache.is_available());
        // Probe key is cleaned up
        assert!(store.is_empty());
    }

    #[test]
    fn test_denied_store_is_unavailable_and_never_written_again() {
        let cache = CacheManager::new(DeniedStore::default(), &CarouselConfig::default());

        assert!(!cache.is_available());
        cache.set_product_list(&sample_products());
        cache.set_favorites(&FavoriteSet::from_ids([ProductId(1)]));

        // Only the single availability write was ever attempted
        assert_eq!(cache.store.write_attempts.get(), 1);
        assert!(cache.product_list().is_none());
        assert!(cache.favorites().is_empty());
        assert!(!cache.is_fresh());
    }

    #[test]
    fn test_timestamp_read_failure_is_logged() {
        let cache = CacheManager::new(UnreadableStore, &CarouselConfig::default());
        let logs = SharedBuf::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .finish();

        let cached_at = tracing::subscriber::with_default(subscriber, || cache.cached_at());

        assert!(cache.is_available());
        assert_eq!(cached_at, None);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Storage read failed"), "log output: {output}");
        assert!(output.contains("ebebek_carousel_timestamp"), "log output: {output}");
    }

    #[test]
    fn test_product_list_roundtrip_through_store() {
        let (cache, _store) = create_test_cache();
        let products = sample_products();

        cache.set_product_list(&products);

        assert_eq!(cache.product_list(), Some(products));
        assert!(cache.is_fresh());
    }

    #[test]
    fn test_product_list_missing_is_none() {
        let (cache, _store) = create_test_cache();
        assert!(cache.product_list().is_none());
        assert!(cache.cached_at().is_none());
        assert!(!cache.is_fresh());
    }

    #[test]
    fn test_corrupt_product_list_is_none() {
        let (cache, store) = create_test_cache();
        store
            .set_item(&StorageKeys::default().products, "{not json")
            .unwrap();

        assert!(cache.product_list().is_none());
    }

    #[test]
    fn test_timestamp_is_stored_as_epoch_millis_text() {
        let (cache, store) = create_test_cache();
        cache.set_product_list_at(&sample_products(), 1_700_000_000_123);

        let raw = store
            .get_item(&StorageKeys::default().timestamp)
            .unwrap()
            .unwrap();
        assert_eq!(raw, "1700000000123");
        assert_eq!(cache.cached_at(), Some(1_700_000_000_123));
    }

    #[test]
    fn test_freshness_just_inside_ttl() {
        let (cache, _store) = create_test_cache();
        let ttl = CarouselConfig::default().cache_ttl_ms();
        let now = 1_700_000_000_000;

        cache.set_product_list_at(&sample_products(), now - ttl + 1);

        assert!(cache.is_fresh_at(now), "Entry 1ms inside the TTL should be fresh");
    }

    #[test]
    fn test_freshness_just_outside_ttl() {
        let (cache, _store) = create_test_cache();
        let ttl = CarouselConfig::default().cache_ttl_ms();
        let now = 1_700_000_000_000;

        cache.set_product_list_at(&sample_products(), now - ttl - 1);

        assert!(!cache.is_fresh_at(now), "Entry 1ms past the TTL should be stale");
    }

    #[test]
    fn test_freshness_exactly_at_ttl_is_stale() {
        let (cache, _store) = create_test_cache();
        let ttl = CarouselConfig::default().cache_ttl_ms();
        let now = 1_700_000_000_000;

        cache.set_product_list_at(&sample_products(), now - ttl);

        assert!(!cache.is_fresh_at(now));
    }

    #[test]
    fn test_unparsable_timestamp_is_stale() {
        let (cache, store) = create_test_cache();
        cache.set_product_list(&sample_products());
        store
            .set_item(&StorageKeys::default().timestamp, "yesterday")
            .unwrap();

        assert!(!cache.is_fresh());
    }

    #[test]
    fn test_favorites_default_to_empty() {
        let (cache, _store) = create_test_cache();
        assert!(cache.favorites().is_empty());
    }

    #[test]
    fn test_favorites_roundtrip() {
        let (cache, store) = create_test_cache();
        let favorites = FavoriteSet::from_ids([ProductId(3), ProductId(7)]);

        cache.set_favorites(&favorites);

        assert_eq!(cache.favorites(), favorites);
        let raw = store
            .get_item(&StorageKeys::default().favorites)
            .unwrap()
            .unwrap();
        assert_eq!(raw, "[3,7]");
    }

    #[test]
    fn test_overwrite_existing_product_list() {
        let (cache, _store) = create_test_cache();
        let first = sample_products();
        let second = vec![Product::new(9, "Wee Baby", "Emzik", 80.0, 60.0)];

        cache.set_product_list(&first);
        cache.set_product_list(&second);

        assert_eq!(cache.product_list(), Some(second), "Cache should contain latest data");
    }
}
