use std::sync::Arc;

use vendo_core::cart::{Cart, CartDraft, CartItem, CartLine};
use vendo_core::error::CommerceError;
use vendo_core::repository::{CartRepository, CatalogRepository};

/// Validates requested item lists against the catalog, prices them, and
/// persists cart snapshots. Sole writer of the cart store.
pub struct CartEngine {
    catalog: Arc<dyn CatalogRepository>,
    carts: Arc<dyn CartRepository>,
}

impl CartEngine {
    pub fn new(catalog: Arc<dyn CatalogRepository>, carts: Arc<dyn CartRepository>) -> Self {
        Self { catalog, carts }
    }

    /// Create a new cart from the requested items.
    ///
    /// An empty request is accepted and yields a zero-line cart. Any item
    /// with `qty <= 0` is rejected before the store is touched. Validation
    /// short-circuits on the first unknown product or stock shortfall and
    /// nothing is persisted.
    pub async fn create_cart(&self, items: &[CartItem]) -> Result<Cart, CommerceError> {
        if let Some(item) = items.iter().find(|i| i.qty <= 0) {
            return Err(CommerceError::InvalidInput(format!(
                "quantity must be positive for product {}",
                item.product_id
            )));
        }

        let draft = self.price_lines(items).await?;
        let cart = self
            .carts
            .insert(&draft)
            .await
            .map_err(CommerceError::store)?;

        tracing::info!(
            cart_id = cart.id,
            total_items = cart.total_items,
            "cart created"
        );
        Ok(cart)
    }

    /// Replace the line list of an existing cart.
    ///
    /// The cart existence check comes before any catalog access. Items with
    /// `qty <= 0` are silently dropped (the removal mechanism); the rest are
    /// validated exactly as on create. The resulting list wholly replaces
    /// the previous one, so a request that drops everything empties the cart.
    pub async fn update_cart(&self, cart_id: i64, items: &[CartItem]) -> Result<Cart, CommerceError> {
        self.carts
            .get(cart_id)
            .await
            .map_err(CommerceError::store)?
            .ok_or(CommerceError::CartNotFound(cart_id))?;

        let kept: Vec<CartItem> = items.iter().filter(|i| i.qty > 0).cloned().collect();
        let draft = self.price_lines(&kept).await?;

        let cart = self
            .carts
            .replace(cart_id, &draft)
            .await
            .map_err(CommerceError::store)?
            .ok_or(CommerceError::CartNotFound(cart_id))?;

        tracing::info!(
            cart_id = cart.id,
            total_items = cart.total_items,
            "cart updated"
        );
        Ok(cart)
    }

    /// Validate and price items in input order. Stock is checked, never
    /// reserved; name and price are snapshotted from the current catalog row.
    async fn price_lines(&self, items: &[CartItem]) -> Result<CartDraft, CommerceError> {
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            let product = self
                .catalog
                .get(item.product_id)
                .await
                .map_err(CommerceError::store)?
                .ok_or(CommerceError::ProductNotFound(item.product_id))?;

            if product.stock < item.qty {
                return Err(CommerceError::InsufficientStock {
                    product_id: product.id,
                    name: product.name,
                    requested: item.qty,
                    available: product.stock,
                });
            }

            lines.push(CartLine {
                product_id: product.id,
                name: product.name,
                price: product.price,
                qty: item.qty,
            });
        }

        Ok(CartDraft::from_lines(lines))
    }
}
