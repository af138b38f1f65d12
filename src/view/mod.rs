//! Markup and styling for the carousel
//!
//! Everything here produces strings: the stylesheet, the container shell and
//! the product cards. Mounting them into a document is the job of the `dom`
//! module, which relies on the class names below to find elements again.

pub mod card;
pub mod markup;
pub mod rating;
pub mod styles;

pub use card::{fallback_image, format_price, render_card, PLACEHOLDER_IMAGE};
pub use markup::{carousel_body, container_markup, escape_html};
pub use rating::{Rating, RatingSource, SeededRatings};
pub use styles::{STYLESHEET, STYLE_CLASS};

/// Stable marker of an injected widget instance
pub const CONTAINER_CLASS: &str = "ebebek-carousel-container";
/// Element hosting navigation, track and dots; hover pauses auto-advance
pub const WRAPPER_CLASS: &str = "ebebek-carousel-wrapper";
/// Horizontally translated row of cards
pub const TRACK_CLASS: &str = "ebebek-carousel-track";
/// One dot per slide
pub const DOT_CLASS: &str = "ebebek-dot";
/// Previous/next buttons
pub const NAV_CLASS: &str = "ebebek-carousel-nav";
/// Per-card favorite toggle
pub const FAVORITE_CLASS: &str = "ebebek-favorite-btn";
/// Product image
pub const IMAGE_CLASS: &str = "ebebek-product-image";
/// State class for the active dot and favorited buttons
pub const ACTIVE_CLASS: &str = "active";

/// Attribute naming the action a clickable element triggers
pub const ACTION_ATTR: &str = "data-action";
/// Attribute carrying a product id
pub const PRODUCT_ID_ATTR: &str = "data-product-id";
/// Attribute carrying a slide index
pub const INDEX_ATTR: &str = "data-index";
/// Attribute carrying a destination URL
pub const URL_ATTR: &str = "data-url";
