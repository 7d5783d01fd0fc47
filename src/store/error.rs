use thiserror::Error;

/// Why a [`Store`](crate::Store) operation was rejected.
///
/// A rejected operation never leaves a partial change behind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("product {0} not found")]
    ProductNotFound(i32),

    #[error("customer {0} not found")]
    CustomerNotFound(i32),

    #[error("order {0} not found")]
    OrderNotFound(i32),

    #[error("review {0} not found")]
    ReviewNotFound(u32),

    #[error("rating {rating} is outside {min}..={max}")]
    InvalidRating { rating: u8, min: u8, max: u8 },
}
