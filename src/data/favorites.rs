//! The user's favorite products

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ProductId;

/// Set of favorited product ids
///
/// Serialized as a JSON array of numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<ProductId>);

impl FavoriteSet {
    /// Creates a set from ids
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Whether `id` is a favorite
    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    /// Flips membership of `id`, returning whether it is now a favorite
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no favorites
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
