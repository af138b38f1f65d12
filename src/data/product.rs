//! Product records from the remote feed

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable product identifier, numeric in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product as published by the feed
///
/// Field names follow the feed contract (`img`, `url`, `original_price`,
/// `price`). Products are immutable for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Brand name
    pub brand: String,
    /// Display name
    pub name: String,
    /// Image URL
    #[serde(rename = "img")]
    pub image_url: String,
    /// Destination URL opened by the card's call to action
    pub url: String,
    /// Price before any discount
    pub original_price: f64,
    /// Price the product currently sells at
    pub price: f64,
}

impl Product {
    /// Creates a product with placeholder URLs (for testing)
    #[cfg(test)]
    pub(crate) fn new(id: u64, brand: &str, name: &str, original_price: f64, price: f64) -> Self {
        Self {
            id: ProductId(id),
            brand: brand.to_string(),
            name: name.to_string(),
            image_url: format!("https://cdn.example.com/{id}.jpg"),
            url: format!("https://www.example.com/p/{id}"),
            original_price,
            price,
        }
    }

    /// Whether the product sells below its original price
    pub fn is_discounted(&self) -> bool {
        self.original_price > self.price
    }

    /// Discount percentage shown on the card
    pub fn discount_percent(&self) -> u32 {
        discount_percent(self.original_price, self.price)
    }
}

/// Rounded discount percentage, or 0 when there is no discount
///
/// `round((original - current) / original * 100)` when `original > current`.
pub fn discount_percent(original: f64, current: f64) -> u32 {
    if !(original > current) || original <= 0.0 {
        return 0;
    }

    let percent = ((original - current) / original * 100.0).round();
    // percent is within (0, 100] for non-negative prices
    percent.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rounds_to_nearest_percent() {
        assert_eq!(discount_percent(200.0, 150.0), 25);
        assert_eq!(discount_percent(300.0, 200.0), 33);
        assert_eq!(discount_percent(300.0, 100.0), 67);
        assert_eq!(discount_percent(99.99, 89.99), 10);
    }

    #[test]
    fn test_discount_half_rounds_up() {
        // 12.5% -> 13
        assert_eq!(discount_percent(200.0, 175.0), 13);
    }

    #[test]
    fn test_no_discount_when_prices_equal_or_higher() {
        assert_eq!(discount_percent(100.0, 100.0), 0);
        assert_eq!(discount_percent(100.0, 120.0), 0);
    }

    #[test]
    fn test_no_discount_for_degenerate_prices() {
        assert_eq!(discount_percent(0.0, -5.0), 0);
        assert_eq!(discount_percent(f64::NAN, 10.0), 0);
    }

    #[test]
    fn test_discount_matches_formula_over_price_grid() {
        for original in [10.0, 49.9, 100.0, 250.5, 1999.0] {
            for current in [0.0, 5.0, 9.99, 49.9, 100.0, 300.0] {
                let expected = if original > current {
                    ((original - current) / original * 100.0_f64).round() as u32
                } else {
                    0
                };
                assert_eq!(
                    discount_percent(original, current),
                    expected,
                    "original={original} current={current}"
                );
            }
        }
    }

    #[test]
    fn test_product_deserializes_from_feed_record() {
        let json = r#"{
            "id": 42,
            "brand": "Mam",
            "name": "Emzik 6+ Ay",
            "img": "https://cdn.example.com/42.jpg",
            "url": "https://www.e-bebek.com/mam-emzik-p-42",
            "original_price": 129.9,
            "price": 99.9
        }"#;

        let product: Product = serde_json::from_str(json).expect("Failed to deserialize Product");

        assert_eq!(product.id, ProductId(42));
        assert_eq!(product.brand, "Mam");
        assert_eq!(product.image_url, "https://cdn.example.com/42.jpg");
        assert!(product.is_discounted());
        assert_eq!(product.discount_percent(), 23);
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId(17).to_string(), "17");
    }
}
