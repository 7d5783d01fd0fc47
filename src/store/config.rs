use serde::Deserialize;

/// Tunables for the reporting queries and review validation of a [`Store`].
///
/// Every field has a default, so a partial document only overrides what it
/// names.
///
/// ```
/// use inventory_tree::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert_eq!(config.top_rated_count, 3);
/// assert_eq!(config.high_rating_threshold, 4.0);
/// assert_eq!((config.min_rating, config.max_rating), (1, 5));
/// ```
///
/// [`Store`]: crate::Store
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// How many products [`Store::top_rated_products`] returns.
    ///
    /// [`Store::top_rated_products`]: crate::Store::top_rated_products
    pub top_rated_count: usize,
    /// Average rating a product must strictly exceed to count as highly rated.
    pub high_rating_threshold: f64,
    /// Lowest accepted review rating.
    pub min_rating: u8,
    /// Highest accepted review rating.
    pub max_rating: u8,
}

impl StoreConfig {
    /// Returns true if `rating` is inside the accepted range.
    #[must_use]
    pub fn accepts_rating(&self, rating: u8) -> bool {
        (self.min_rating..=self.max_rating).contains(&rating)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            top_rated_count: 3,
            high_rating_threshold: 4.0,
            min_rating: 1,
            max_rating: 5,
        }
    }
}
