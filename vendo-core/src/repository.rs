use async_trait::async_trait;

use crate::cart::{Cart, CartDraft};
use crate::product::Product;

/// Repository trait for catalog reads
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List products in insertion order. With a filter, match the text as a
    /// case-insensitive substring of name or description; no match is an
    /// empty list, never an error.
    async fn list(
        &self,
        filter: Option<&str>,
    ) -> Result<Vec<Product>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: i64,
    ) -> Result<Option<Product>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for cart persistence. The cart engine is the sole writer.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Persist a new cart, assigning a fresh identifier and timestamps.
    async fn insert(
        &self,
        draft: &CartDraft,
    ) -> Result<Cart, Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: i64,
    ) -> Result<Option<Cart>, Box<dyn std::error::Error + Send + Sync>>;

    /// Overwrite the line list and totals of an existing cart in place.
    /// `created_at` is preserved, `updated_at` is refreshed. Returns `None`
    /// when no cart with that id exists.
    async fn replace(
        &self,
        id: i64,
        draft: &CartDraft,
    ) -> Result<Option<Cart>, Box<dyn std::error::Error + Send + Sync>>;
}
