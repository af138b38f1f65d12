//! Carousel widget state management
//!
//! This module contains the per-mount widget context: the loaded products,
//! favorites, slide state and the persistence handles. Input is handled as
//! [`Action`]s and answered with [`Effect`]s that the DOM layer applies, so
//! the whole flow runs without a browser.

use tracing::{debug, info};

use crate::cache::{CacheManager, KeyValueStore};
use crate::carousel::{Carousel, Position};
use crate::config::CarouselConfig;
use crate::data::{FavoriteSet, FeedError, Product, ProductFeed, ProductId, ProductSource};
use crate::interaction::{action_for_key, Action};
use crate::view::{carousel_body, RatingSource, SeededRatings};

/// Lifecycle of a widget instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Products are being resolved
    Loading,
    /// Products are loaded and rendered
    Ready,
    /// Loading failed; the widget stays un-rendered
    Failed,
}

/// Visual side effect requested by a state change
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Move the track and refresh dots and buttons
    UpdatePosition(Position),
    /// Update one card's favorite indicator
    SetFavorite {
        /// Product whose card changes
        id: ProductId,
        /// New favorite state
        active: bool,
    },
    /// Open a URL in a new browsing context
    OpenUrl(String),
    /// Start a fresh auto-advance timer, cancelling any running one
    StartTimer,
    /// Cancel the auto-advance timer
    StopTimer,
}

/// Per-mount carousel context
pub struct CarouselWidget<S, F> {
    /// Current lifecycle state
    pub state: WidgetState,
    config: CarouselConfig,
    cache: CacheManager<S>,
    source: ProductSource<F>,
    products: Vec<Product>,
    favorites: FavoriteSet,
    carousel: Carousel,
    ratings: Box<dyn RatingSource>,
    auto_advance_paused: bool,
}

impl<S: KeyValueStore, F: ProductFeed> CarouselWidget<S, F> {
    /// Creates a widget over `store` and `feed`
    ///
    /// Ratings come from a generator seeded with 0; use
    /// [`with_ratings`](Self::with_ratings) to vary them.
    pub fn new(config: CarouselConfig, store: S, feed: F) -> Self {
        let cache = CacheManager::new(store, &config);
        let carousel = Carousel::new(0, config.page_size);
        Self {
            state: WidgetState::Loading,
            config,
            cache,
            source: ProductSource::new(feed),
            products: Vec::new(),
            favorites: FavoriteSet::default(),
            carousel,
            ratings: Box::new(SeededRatings::new(0)),
            auto_advance_paused: false,
        }
    }

    /// Replaces the rating generator
    pub fn with_ratings(mut self, ratings: impl RatingSource + 'static) -> Self {
        self.ratings = Box::new(ratings);
        self
    }

    /// Loads favorites and products
    ///
    /// Favorites never fail (storage problems yield an empty set). A product
    /// feed failure moves the widget to [`WidgetState::Failed`] and is
    /// returned to the caller.
    pub async fn load(&mut self) -> Result<(), FeedError> {
        self.state = WidgetState::Loading;
        self.favorites = self.cache.favorites();

        match self.source.get_products(&self.cache).await {
            Ok(products) => {
                self.carousel = Carousel::new(products.len(), self.config.page_size);
                self.products = products;
                self.state = WidgetState::Ready;
                info!(
                    products = self.products.len(),
                    slides = self.carousel.slide_count(),
                    "Carousel data loaded"
                );
                Ok(())
            }
            Err(error) => {
                self.state = WidgetState::Failed;
                Err(error)
            }
        }
    }

    /// Markup for the wrapper: navigation, cards and dots
    pub fn render_body(&mut self) -> String {
        carousel_body(
            &self.products,
            &self.favorites,
            self.ratings.as_mut(),
            &self.carousel,
            &self.config,
        )
    }

    /// Current visual position
    pub fn position(&self) -> Position {
        self.carousel.position()
    }

    /// Applies an action and returns the effects to render
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        if self.state != WidgetState::Ready {
            debug!(?action, "Ignoring action before the carousel is ready");
            return Vec::new();
        }

        match action {
            Action::Previous => {
                self.carousel.previous();
                vec![Effect::UpdatePosition(self.position())]
            }
            Action::Next => {
                self.carousel.next();
                vec![Effect::UpdatePosition(self.position())]
            }
            Action::GoTo(index) => {
                self.carousel.go_to(index);
                vec![Effect::UpdatePosition(self.position())]
            }
            Action::ToggleFavorite(id) => {
                let active = self.toggle_favorite(id);
                vec![Effect::SetFavorite { id, active }]
            }
            Action::OpenProduct(url) => vec![Effect::OpenUrl(url)],
            Action::PauseAutoAdvance => {
                self.auto_advance_paused = true;
                vec![Effect::StopTimer]
            }
            Action::ResumeAutoAdvance => {
                self.auto_advance_paused = false;
                vec![Effect::StartTimer]
            }
        }
    }

    /// Handles a key press
    ///
    /// Returns `None` when the key is not bound, in which case the event's
    /// default behavior must be left alone.
    pub fn handle_key(&mut self, key: &str) -> Option<Vec<Effect>> {
        let action = action_for_key(key)?;
        Some(self.handle(action))
    }

    /// One auto-advance tick; wraps to the first slide after the last
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.state != WidgetState::Ready || self.auto_advance_paused {
            return Vec::new();
        }

        self.carousel.auto_advance();
        vec![Effect::UpdatePosition(self.position())]
    }

    /// Flips `id` in the favorite set and persists it
    ///
    /// Returns whether `id` is now a favorite.
    pub fn toggle_favorite(&mut self, id: ProductId) -> bool {
        let active = self.favorites.toggle(id);
        self.cache.set_favorites(&self.favorites);
        active
    }

    /// Loaded products, in card order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Current slide index
    pub fn current_index(&self) -> usize {
        self.carousel.current_index()
    }

    /// Current favorites
    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Slide state
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Persistent cache
    pub fn cache(&self) -> &CacheManager<S> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    /// Feed serving a fixed list
    #[derive(Debug)]
    struct FixedFeed(Result<Vec<Product>, u16>);

    impl ProductFeed for FixedFeed {
        async fn fetch_products(&self) -> Result<Vec<Product>, FeedError> {
            self.0.clone().map_err(FeedError::Status)
        }
    }

    fn products(count: u64) -> Vec<Product> {
        (1..=count)
            .map(|id| Product::new(id, "Brand", "Name", 100.0, 75.0))
            .collect()
    }

    async fn ready_widget(count: u64) -> (CarouselWidget<MemoryStore, FixedFeed>, MemoryStore) {
        let store = MemoryStore::new();
        let mut widget = CarouselWidget::new(
            CarouselConfig::default(),
            store.clone(),
            FixedFeed(Ok(products(count))),
        );
        widget.load().await.unwrap();
        (widget, store)
    }

    fn position_index(effects: &[Effect]) -> Option<usize> {
        match effects {
            [Effect::UpdatePosition(position)] => Some(position.index),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_load_transitions_to_ready() {
        let (widget, _store) = ready_widget(12).await;

        assert_eq!(widget.state, WidgetState::Ready);
        assert_eq!(widget.products().len(), 12);
        assert_eq!(widget.carousel().max_index(), 2);
        assert_eq!(widget.current_index(), 0);
    }

    #[tokio::test]
    async fn test_load_failure_marks_failed() {
        let mut widget = CarouselWidget::new(
            CarouselConfig::default(),
            MemoryStore::new(),
            FixedFeed(Err(500)),
        );

        let result = widget.load().await;

        assert!(matches!(result, Err(FeedError::Status(500))));
        assert_eq!(widget.state, WidgetState::Failed);
        assert!(widget.handle(Action::Next).is_empty());
    }

    #[tokio::test]
    async fn test_actions_before_load_are_ignored() {
        let mut widget = CarouselWidget::new(
            CarouselConfig::default(),
            MemoryStore::new(),
            FixedFeed(Ok(products(3))),
        );

        assert_eq!(widget.state, WidgetState::Loading);
        assert!(widget.handle(Action::Next).is_empty());
        assert!(widget.tick().is_empty());
    }

    #[tokio::test]
    async fn test_load_restores_persisted_favorites() {
        let store = MemoryStore::new();
        store.set_item("ebebek_favorites", "[2, 5]").unwrap();
        let mut widget = CarouselWidget::new(
            CarouselConfig::default(),
            store,
            FixedFeed(Ok(products(6))),
        );

        widget.load().await.unwrap();

        assert!(widget.favorites().contains(ProductId(2)));
        assert!(widget.favorites().contains(ProductId(5)));
        assert_eq!(widget.favorites().len(), 2);
    }

    #[tokio::test]
    async fn test_next_three_times_clamps() {
        let (mut widget, _store) = ready_widget(12).await;

        let indices: Vec<_> = (0..3)
            .map(|_| position_index(&widget.handle(Action::Next)))
            .collect();

        assert_eq!(indices, vec![Some(1), Some(2), Some(2)]);
    }

    #[tokio::test]
    async fn test_previous_and_goto() {
        let (mut widget, _store) = ready_widget(12).await;

        assert_eq!(position_index(&widget.handle(Action::Previous)), Some(0));
        assert_eq!(position_index(&widget.handle(Action::GoTo(2))), Some(2));
        assert_eq!(position_index(&widget.handle(Action::Previous)), Some(1));
    }

    #[tokio::test]
    async fn test_arrow_keys_navigate() {
        let (mut widget, _store) = ready_widget(12).await;

        assert_eq!(widget.handle_key("ArrowRight").map(|e| position_index(&e)), Some(Some(1)));
        assert_eq!(widget.handle_key("ArrowLeft").map(|e| position_index(&e)), Some(Some(0)));
        assert!(widget.handle_key("Enter").is_none());
    }

    #[tokio::test]
    async fn test_tick_wraps_after_last_slide() {
        let (mut widget, _store) = ready_widget(12).await;

        let indices: Vec<_> = (0..4).map(|_| position_index(&widget.tick())).collect();

        assert_eq!(indices, vec![Some(1), Some(2), Some(0), Some(1)]);
    }

    #[tokio::test]
    async fn test_hover_pauses_and_resumes_auto_advance() {
        let (mut widget, _store) = ready_widget(12).await;

        assert_eq!(widget.handle(Action::PauseAutoAdvance), vec![Effect::StopTimer]);
        assert!(widget.auto_advance_paused);
        assert!(widget.tick().is_empty());

        assert_eq!(widget.handle(Action::ResumeAutoAdvance), vec![Effect::StartTimer]);
        assert!(!widget.auto_advance_paused);
        assert_eq!(position_index(&widget.tick()), Some(1));
    }

    #[tokio::test]
    async fn test_toggle_favorite_twice_restores_and_persists() {
        let (mut widget, store) = ready_widget(6).await;

        assert_eq!(
            widget.handle(Action::ToggleFavorite(ProductId(3))),
            vec![Effect::SetFavorite {
                id: ProductId(3),
                active: true
            }]
        );
        assert_eq!(store.get_item("ebebek_favorites").unwrap().as_deref(), Some("[3]"));

        assert_eq!(
            widget.handle(Action::ToggleFavorite(ProductId(3))),
            vec![Effect::SetFavorite {
                id: ProductId(3),
                active: false
            }]
        );
        assert!(widget.favorites().is_empty());
        assert_eq!(store.get_item("ebebek_favorites").unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_open_product_effect() {
        let (mut widget, _store) = ready_widget(1).await;

        let effects = widget.handle(Action::OpenProduct("https://example.com/p/1".to_string()));

        assert_eq!(effects, vec![Effect::OpenUrl("https://example.com/p/1".to_string())]);
    }

    #[tokio::test]
    async fn test_render_body_reflects_favorites() {
        let (mut widget, _store) = ready_widget(5).await;
        widget.toggle_favorite(ProductId(1));

        let html = widget.render_body();

        assert_eq!(html.matches("ebebek-favorite-btn active").count(), 1);
        assert_eq!(html.matches("class=\"ebebek-dot").count(), 1);
    }

    #[tokio::test]
    async fn test_render_body_is_seedable() {
        let (widget_a, _) = ready_widget(5).await;
        let (widget_b, _) = ready_widget(5).await;
        let mut widget_a = widget_a.with_ratings(SeededRatings::new(11));
        let mut widget_b = widget_b.with_ratings(SeededRatings::new(11));

        assert_eq!(widget_a.render_body(), widget_b.render_body());
    }
}
