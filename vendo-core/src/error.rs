use thiserror::Error;

/// Failures a caller of the catalog/cart operations can act on.
///
/// Variants are distinguishable so a presentation layer can render
/// "product not found" vs "not enough stock" vs "cart not found".
#[derive(Debug, Error)]
pub enum CommerceError {
    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Cart {0} not found")]
    CartNotFound(i64),

    #[error("Insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        name: String,
        requested: i64,
        available: i64,
    },

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Storage failure: {0}")]
    Store(String),
}

impl CommerceError {
    /// Wrap an opaque store/transport fault. Retry policy belongs to the
    /// caller, not to this layer.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::Store(err.to_string())
    }
}
