//! Core data models and the product source
//!
//! This module contains the product types decoded from the remote feed, the
//! favorite set, and the client that resolves the product list from cache or
//! network.

pub mod favorites;
pub mod feed;
pub mod product;
pub mod source;

pub use favorites::FavoriteSet;
pub use feed::{FeedError, HttpFeed, ProductFeed};
pub use product::{discount_percent, Product, ProductId};
pub use source::ProductSource;
