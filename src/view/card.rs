//! Product card rendering

use super::markup::escape_html;
use super::rating::{Rating, MAX_STARS};
use super::{ACTION_ATTR, FAVORITE_CLASS, IMAGE_CLASS, PRODUCT_ID_ATTR, URL_ATTR};
use crate::config::CarouselConfig;
use crate::data::Product;
use crate::interaction::{ACTION_FAVORITE, ACTION_OPEN};

/// Inline SVG shown when a product image fails to load
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMzAwIiBoZWlnaHQ9IjIwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMTAwJSIgaGVpZ2h0PSIxMDAlIiBmaWxsPSIjZjhmOWZhIi8+PHRleHQgeD0iNTAlIiB5PSI1MCUiIGZvbnQtZmFtaWx5PSJBcmlhbCwgc2Fucy1zZXJpZiIgZm9udC1zaXplPSIxNCIgZmlsbD0iIzk5OSIgdGV4dC1hbmNob3I9Im1pZGRsZSIgZHk9Ii4zZW0iPkltYWdlIG5vdCBmb3VuZDwvdGV4dD48L3N2Zz4=";

/// Source to swap in for a broken product image
///
/// `None` once the placeholder itself is showing, so a failing placeholder
/// cannot loop.
pub fn fallback_image(current_src: &str) -> Option<&'static str> {
    (current_src != PLACEHOLDER_IMAGE).then_some(PLACEHOLDER_IMAGE)
}

/// Formats a price with two decimals and the currency suffix
pub fn format_price(price: f64, currency_suffix: &str) -> String {
    format!("{price:.2} {currency_suffix}")
}

fn render_stars(rating: Rating) -> String {
    (1..=MAX_STARS)
        .map(|star| {
            if star <= rating.stars {
                r#"<span class="ebebek-star">★</span>"#
            } else {
                r#"<span class="ebebek-star empty">★</span>"#
            }
        })
        .collect()
}

fn render_pricing(product: &Product, currency_suffix: &str) -> String {
    let current = format_price(product.price, currency_suffix);

    if product.is_discounted() {
        format!(
            r#"<div class="ebebek-pricing"><div class="ebebek-price-row"><span class="ebebek-original-price">{original}</span><span class="ebebek-discount">%{discount}</span></div><div class="ebebek-price-row"><span class="ebebek-current-price">{current}</span></div></div>"#,
            original = format_price(product.original_price, currency_suffix),
            discount = product.discount_percent(),
        )
    } else {
        format!(
            r#"<div class="ebebek-pricing"><div class="ebebek-price-row"><span class="ebebek-current-price no-discount">{current}</span></div></div>"#
        )
    }
}

/// Renders one product card
///
/// Product text is escaped. Clicks are routed through `data-action`
/// attributes rather than inline handlers.
pub fn render_card(
    product: &Product,
    is_favorite: bool,
    rating: Rating,
    config: &CarouselConfig,
) -> String {
    let name = escape_html(&product.name);
    let favorite_state = if is_favorite { " active" } else { "" };

    format!(
        concat!(
            r#"<div class="ebebek-product-card" {id_attr}="{id}">"#,
            r#"<div class="ebebek-product-image-container">"#,
            r#"<img src="{image}" alt="{name}" class="{image_class}" loading="lazy">"#,
            r#"<button type="button" class="{favorite_class}{favorite_state}" {action_attr}="{favorite_action}" {id_attr}="{id}" aria-pressed="{is_favorite}" aria-label="Favori">♥</button>"#,
            r#"</div>"#,
            r#"<div class="ebebek-product-info">"#,
            r#"<div class="ebebek-product-brand">{brand}</div>"#,
            r#"<div class="ebebek-product-name">{name}</div>"#,
            r#"<div class="ebebek-rating"><div class="ebebek-stars">{stars}</div><span class="ebebek-review-count">({reviews})</span></div>"#,
            "{pricing}",
            r#"<button type="button" class="ebebek-add-to-cart-btn" {action_attr}="{open_action}" {url_attr}="{url}">{cta}</button>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        id_attr = PRODUCT_ID_ATTR,
        id = product.id,
        image = escape_html(&product.image_url),
        name = name,
        image_class = IMAGE_CLASS,
        favorite_class = FAVORITE_CLASS,
        favorite_state = favorite_state,
        action_attr = ACTION_ATTR,
        favorite_action = ACTION_FAVORITE,
        is_favorite = is_favorite,
        brand = escape_html(&product.brand),
        stars = render_stars(rating),
        reviews = rating.reviews,
        pricing = render_pricing(product, &config.currency_suffix),
        open_action = ACTION_OPEN,
        url_attr = URL_ATTR,
        url = escape_html(&product.url),
        cta = escape_html(&config.cta_label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_image_falls_back_to_placeholder_once() {
        assert_eq!(fallback_image("https://cdn.example.com/1.jpg"), Some(PLACEHOLDER_IMAGE));
        assert_eq!(fallback_image(""), Some(PLACEHOLDER_IMAGE));
        assert_eq!(fallback_image(PLACEHOLDER_IMAGE), None);
    }

    fn rating() -> Rating {
        Rating {
            stars: 4,
            reviews: 128,
        }
    }

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(149.9, "₺"), "149.90 ₺");
        assert_eq!(format_price(5.0, "₺"), "5.00 ₺");
    }

    #[test]
    fn test_discounted_card_shows_discount_row() {
        let product = Product::new(1, "Chicco", "Biberon", 200.0, 150.0);
        let html = render_card(&product, false, rating(), &CarouselConfig::default());

        assert!(html.contains("ebebek-original-price\">200.00 ₺"));
        assert!(html.contains("ebebek-discount\">%25"));
        assert!(html.contains("ebebek-current-price\">150.00 ₺"));
        assert!(!html.contains("no-discount"));
    }

    #[test]
    fn test_undiscounted_card_uses_neutral_price() {
        let product = Product::new(2, "Prima", "Bez", 99.0, 99.0);
        let html = render_card(&product, false, rating(), &CarouselConfig::default());

        assert!(!html.contains("ebebek-original-price"));
        assert!(!html.contains("ebebek-discount\""));
        assert!(html.contains("ebebek-current-price no-discount\">99.00 ₺"));
    }

    #[test]
    fn test_favorite_state_marks_button_active() {
        let product = Product::new(3, "Mam", "Emzik", 50.0, 40.0);

        let favorite = render_card(&product, true, rating(), &CarouselConfig::default());
        let plain = render_card(&product, false, rating(), &CarouselConfig::default());

        assert!(favorite.contains("ebebek-favorite-btn active"));
        assert!(favorite.contains("aria-pressed=\"true\""));
        assert!(!plain.contains("ebebek-favorite-btn active"));
    }

    #[test]
    fn test_card_routes_clicks_through_data_attributes() {
        let product = Product::new(4, "Mam", "Emzik", 50.0, 40.0);
        let html = render_card(&product, false, rating(), &CarouselConfig::default());

        assert!(html.contains("data-product-id=\"4\""));
        assert!(html.contains("data-action=\"favorite\""));
        assert!(html.contains("data-action=\"open\" data-url=\"https://www.example.com/p/4\""));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn test_card_escapes_product_text() {
        let mut product = Product::new(5, "<b>Brand</b>", "Tom & Jerry \"Set\"", 10.0, 10.0);
        product.url = "https://example.com/?a=1&b=2".to_string();
        let html = render_card(&product, false, rating(), &CarouselConfig::default());

        assert!(html.contains("&lt;b&gt;Brand&lt;/b&gt;"));
        assert!(html.contains("Tom &amp; Jerry &quot;Set&quot;"));
        assert!(html.contains("?a=1&amp;b=2"));
        assert!(!html.contains("<b>Brand"));
    }

    #[test]
    fn test_card_renders_rating() {
        let product = Product::new(6, "Mam", "Emzik", 50.0, 40.0);
        let html = render_card(&product, false, rating(), &CarouselConfig::default());

        assert_eq!(html.matches("ebebek-star\"").count(), 4);
        assert_eq!(html.matches("ebebek-star empty").count(), 1);
        assert!(html.contains("(128)"));
    }
}
