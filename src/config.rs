//! Widget configuration
//!
//! Collects every constant the carousel depends on (feed location, storage
//! keys, timing and layout) into a single [`CarouselConfig`] so the other
//! modules never hard-code them.

use std::time::Duration;

/// Canonical JSON product feed
pub const DEFAULT_FEED_URL: &str = "https://gist.githubusercontent.com/sevindi/8bcbde9f02c1d4abe112809c974e1f49/raw/9bf93b58df623a9b16f1db721cd0a7a539296cf0/products.json";

/// Storage keys used by the persistent cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Serialized product list snapshot
    pub products: String,
    /// Capture timestamp of the snapshot (epoch milliseconds as text)
    pub timestamp: String,
    /// Serialized favorite product ids
    pub favorites: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            products: "ebebek_carousel_data".to_string(),
            timestamp: "ebebek_carousel_timestamp".to_string(),
            favorites: "ebebek_favorites".to_string(),
        }
    }
}

/// Configuration for a carousel instance
#[derive(Debug, Clone)]
pub struct CarouselConfig {
    /// URL of the remote product feed
    pub feed_url: String,
    /// Keys for the three storage namespaces
    pub storage_keys: StorageKeys,
    /// How long a cached product list stays fresh
    pub cache_ttl: Duration,
    /// Number of cards visible per slide
    pub page_size: usize,
    /// Interval between auto-advance ticks
    pub auto_advance_interval: Duration,
    /// Selectors tried in order to find the element the widget is inserted after
    pub anchor_selectors: Vec<String>,
    /// Paths treated as the homepage
    pub homepage_paths: Vec<String>,
    /// Heading shown above the cards
    pub title: String,
    /// Label of the per-card call-to-action button
    pub cta_label: String,
    /// Suffix appended to formatted prices
    pub currency_suffix: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            storage_keys: StorageKeys::default(),
            cache_ttl: Duration::from_secs(30 * 60), // 30 minutes
            page_size: 5,
            auto_advance_interval: Duration::from_millis(5000),
            anchor_selectors: [".hero.banner", ".hero-banner", ".hero", ".banner"]
                .into_iter()
                .map(String::from)
                .collect(),
            homepage_paths: ["/", "/index.html", ""]
                .into_iter()
                .map(String::from)
                .collect(),
            title: "Beğenebileceğinizi düşündüklerimiz".to_string(),
            cta_label: "Sepete Ekle".to_string(),
            currency_suffix: "₺".to_string(),
        }
    }
}

impl CarouselConfig {
    /// Cache TTL in whole milliseconds, the unit timestamps are stored in
    pub fn cache_ttl_ms(&self) -> i64 {
        i64::try_from(self.cache_ttl.as_millis()).unwrap_or(i64::MAX)
    }
}
