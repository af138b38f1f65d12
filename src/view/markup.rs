//! Container and carousel body markup

use super::card::render_card;
use super::rating::RatingSource;
use super::{
    ACTION_ATTR, ACTIVE_CLASS, DOT_CLASS, INDEX_ATTR, NAV_CLASS, TRACK_CLASS, WRAPPER_CLASS,
};
use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::data::{FavoriteSet, Product};
use crate::interaction::{ACTION_GO_TO, ACTION_NEXT, ACTION_PREVIOUS};

/// Escapes text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Inner markup of the container: title plus an empty wrapper
///
/// The wrapper is filled by [`carousel_body`] once products are loaded.
pub fn container_markup(config: &CarouselConfig) -> String {
    format!(
        r#"<h2 class="ebebek-carousel-title">{title}</h2><div class="{WRAPPER_CLASS}"></div>"#,
        title = escape_html(&config.title),
    )
}

fn dots_markup(carousel: &Carousel) -> String {
    (0..carousel.slide_count())
        .map(|index| {
            let active = if index == carousel.current_index() {
                format!(" {ACTIVE_CLASS}")
            } else {
                String::new()
            };
            format!(
                r#"<div class="{DOT_CLASS}{active}" {ACTION_ATTR}="{ACTION_GO_TO}" {INDEX_ATTR}="{index}" role="button" aria-label="Slide {label}"></div>"#,
                label = index + 1,
            )
        })
        .collect()
}

/// Navigation buttons, card track and dots for the current product list
///
/// Ratings are drawn from `ratings` in product order.
pub fn carousel_body(
    products: &[Product],
    favorites: &FavoriteSet,
    ratings: &mut dyn RatingSource,
    carousel: &Carousel,
    config: &CarouselConfig,
) -> String {
    let cards: String = products
        .iter()
        .map(|product| {
            let rating = ratings.rating_for(product.id);
            render_card(product, favorites.contains(product.id), rating, config)
        })
        .collect();

    format!(
        concat!(
            r#"<button type="button" class="{nav} prev" {action}="{previous}" aria-label="Önceki">‹</button>"#,
            r#"<button type="button" class="{nav} next" {action}="{next}" aria-label="Sonraki">›</button>"#,
            r#"<div class="{track}">{cards}</div>"#,
            r#"<div class="ebebek-carousel-dots">{dots}</div>"#,
        ),
        nav = NAV_CLASS,
        action = ACTION_ATTR,
        previous = ACTION_PREVIOUS,
        next = ACTION_NEXT,
        track = TRACK_CLASS,
        cards = cards,
        dots = dots_markup(carousel),
    )
}
