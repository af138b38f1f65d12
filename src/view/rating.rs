//! Decorative ratings
//!
//! Ratings and review counts are not real data. They come from a seedable
//! generator so tests can pin the output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::ProductId;

/// Highest star count shown on a card
pub const MAX_STARS: u8 = 5;

/// Upper bound (exclusive) for generated review counts
const MAX_REVIEWS: u32 = 300;

/// Star rating and review count shown on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    /// Filled stars, `1..=MAX_STARS`
    pub stars: u8,
    /// Number of reviews
    pub reviews: u32,
}

/// Produces a rating for a product
pub trait RatingSource {
    /// Rating to show for `id`
    fn rating_for(&mut self, id: ProductId) -> Rating;
}

/// Random ratings from a seeded `StdRng`
#[derive(Debug, Clone)]
pub struct SeededRatings {
    rng: StdRng,
}

impl SeededRatings {
    /// Creates a generator from `seed`; equal seeds give equal sequences
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RatingSource for SeededRatings {
    fn rating_for(&mut self, _id: ProductId) -> Rating {
        Rating {
            stars: self.rng.gen_range(1..=MAX_STARS),
            reviews: self.rng.gen_range(0..MAX_REVIEWS),
        }
    }
}
