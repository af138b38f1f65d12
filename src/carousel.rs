//! Carousel slide state
//!
//! Owns the current slide index and derives everything the view needs to
//! position the track: offset, active dot and navigation button state.

/// Visual position derived from the carousel state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Current slide index, also the active dot
    pub index: usize,
    /// Horizontal track offset in percent (zero or negative)
    pub offset_percent: f64,
    /// Whether the previous button is disabled
    pub prev_disabled: bool,
    /// Whether the next button is disabled
    pub next_disabled: bool,
}

impl Position {
    /// CSS `transform` value for the track
    pub fn transform(&self) -> String {
        format!("translateX({}%)", self.offset_percent)
    }
}

/// Slide index state machine over `[0, max_index]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    current_index: usize,
    product_count: usize,
    page_size: usize,
}

impl Carousel {
    /// Creates a carousel at slide 0
    ///
    /// A `page_size` of zero is treated as one.
    pub fn new(product_count: usize, page_size: usize) -> Self {
        Self {
            current_index: 0,
            product_count,
            page_size: page_size.max(1),
        }
    }

    /// Current slide index
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of slides, `ceil(product_count / page_size)`
    pub fn slide_count(&self) -> usize {
        self.product_count.div_ceil(self.page_size)
    }

    /// Highest valid slide index; 0 when there are no products
    pub fn max_index(&self) -> usize {
        self.slide_count().saturating_sub(1)
    }

    /// Whether `previous` would move
    fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Whether `next` would move
    fn can_go_next(&self) -> bool {
        self.current_index < self.max_index()
    }

    /// Advances one slide, stopping at the last one
    ///
    /// Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        if self.can_go_next() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one slide, stopping at the first one
    ///
    /// Returns whether the index changed.
    pub fn previous(&mut self) -> bool {
        if self.can_go_previous() {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `index`, clamped to `[0, max_index]`
    pub fn go_to(&mut self, index: usize) {
        self.current_index = index.min(self.max_index());
    }

    /// Timer-driven advance: like `next`, but wraps to 0 from the last slide
    pub fn auto_advance(&mut self) {
        if self.current_index >= self.max_index() {
            self.current_index = 0;
        } else {
            self.current_index += 1;
        }
    }

    /// Track offset in percent, `-(index * 100 / page_size)`
    pub fn offset_percent(&self) -> f64 {
        let step = 100.0 / self.page_size as f64;
        0.0 - self.current_index as f64 * step
    }

    /// Current visual position
    pub fn position(&self) -> Position {
        Position {
            index: self.current_index,
            offset_percent: self.offset_percent(),
            prev_disabled: !self.can_go_previous(),
            next_disabled: !self.can_go_next(),
        }
    }
}
