//! Product source: cache first, network second

use tracing::{error, info};

use super::{FeedError, Product, ProductFeed};
use crate::cache::{CacheManager, KeyValueStore};

/// Resolves the current product list
///
/// Returns the cached snapshot while it is fresh; otherwise performs one
/// fetch through the feed and repopulates the cache.
#[derive(Debug, Clone)]
pub struct ProductSource<F> {
    feed: F,
}

impl<F: ProductFeed> ProductSource<F> {
    /// Creates a product source backed by `feed`
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    /// Gets products from the cache when fresh, else from the feed
    ///
    /// # Behavior
    /// - Fresh timestamp and parsable snapshot: returns the snapshot
    /// - Fresh timestamp but missing/corrupt snapshot: falls through to the feed
    /// - Otherwise fetches once; on success the result is cached with a new
    ///   timestamp, on failure the error is returned untouched
    pub async fn get_products<S: KeyValueStore>(
        &self,
        cache: &CacheManager<S>,
    ) -> Result<Vec<Product>, FeedError> {
        if cache.is_fresh() {
            if let Some(products) = cache.product_list() {
                info!(count = products.len(), "Loading products from cache...");
                return Ok(products);
            }
        }

        match self.feed.fetch_products().await {
            Ok(products) => {
                cache.set_product_list(&products);
                Ok(products)
            }
            Err(fetch_error) => {
                error!(error = %fetch_error, "Error fetching products");
                Err(fetch_error)
            }
        }
    }
}
