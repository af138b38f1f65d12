//! Remote product feed client
//!
//! Fetches the canonical JSON product feed over HTTP. On wasm, `reqwest`
//! drives the browser's `fetch`.

use reqwest::Client;
use thiserror::Error;
use tracing::info;

use super::Product;

/// Errors that can occur when fetching the product feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The feed answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The body was not a JSON array of products
    #[error("Failed to parse product feed: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Source of a freshly fetched product list
///
/// A single attempt per call; implementations never retry.
#[allow(async_fn_in_trait)]
pub trait ProductFeed {
    /// Fetches the full product list
    async fn fetch_products(&self) -> Result<Vec<Product>, FeedError>;
}

/// Client for the JSON product feed
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    url: String,
}

impl HttpFeed {
    /// Creates a feed client for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl ProductFeed for HttpFeed {
    async fn fetch_products(&self) -> Result<Vec<Product>, FeedError> {
        info!(url = %self.url, "Fetching products from API...");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&text)?;

        info!(count = products.len(), "Products fetched successfully");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = FeedError::Status(500);
        assert_eq!(error.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_parse_error_from_serde() {
        let parse = serde_json::from_str::<Vec<Product>>("{\"not\": \"a list\"}").unwrap_err();
        let error = FeedError::from(parse);
        assert!(matches!(error, FeedError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_request_failure() {
        // Port 9 (discard) on loopback refuses connections on test hosts
        let feed = HttpFeed::new("http://127.0.0.1:9/products.json");

        let result = feed.fetch_products().await;

        assert!(matches!(result, Err(FeedError::RequestFailed(_))));
    }
}
